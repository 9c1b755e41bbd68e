//! Upload screen: pick a photo or folder, tag what is new, store every photo.

use console::Style;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use ropa_core::{Config, FileDiscovery, Session, Tagger};
use std::path::PathBuf;

use super::theme::{self, ropa_theme};

/// Prompt for a path and run one upload batch.
pub async fn guided_upload(
    session: &mut Session,
    tagger: &Tagger,
    config: &Config,
) -> anyhow::Result<()> {
    let theme = ropa_theme();
    let discovery = FileDiscovery::new(config.upload.clone());

    let files = loop {
        let Some(raw_path) = super::handle_interrupt(
            Input::<String>::with_theme(&theme)
                .with_prompt("Foto o carpeta con tus imágenes (.jpg)")
                .interact_text(),
        )?
        else {
            return Ok(());
        };

        let path = PathBuf::from(shellexpand::tilde(raw_path.trim()).into_owned());
        if !path.exists() {
            theme::warn(format!("No existe: {}", path.display()));
            continue;
        }

        let found = discovery.discover(&path);
        if found.is_empty() {
            theme::warn(format!(
                "No encontré imágenes ({}) en esa ruta.",
                config.upload.supported_formats.join(", ")
            ));
            continue;
        }
        break found;
    };

    let dim = Style::new().for_stderr().dim();
    eprintln!(
        "  {}",
        dim.apply_to(format!(
            "{} foto(s) ({:.1} MB)",
            files.len(),
            FileDiscovery::total_size(&files) as f64 / 1_000_000.0
        ))
    );

    let uploads = match discovery.read_all(&files) {
        Ok(uploads) => uploads,
        Err(e) => {
            theme::error(e);
            return Ok(());
        }
    };

    let pb = create_progress_bar(uploads.len() as u64);
    pb.set_message(format!(
        "Preparando todo para procesar {} fotos...",
        uploads.len()
    ));

    let result = session
        .upload(uploads, tagger, |progress| {
            pb.set_position(progress.processed as u64);
            pb.set_message(format!(
                "Fotos procesadas: {} de {} ({})",
                progress.processed, progress.total, progress.item
            ));
        })
        .await;
    pb.finish_and_clear();

    match result {
        Ok(summary) => {
            theme::success(format!(
                "{} etiquetada(s) con IA, {} ya tenían etiquetas",
                summary.tagged.len(),
                summary.reused.len()
            ));
        }
        Err(e) => {
            tracing::error!("Upload failed: {e}");
            theme::error(format!("No se pudo procesar: {e}"));
        }
    }

    Ok(())
}

fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    // The template is a literal; a parse failure would be a programming error
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.magenta} [{elapsed_precise}] [{bar:40.magenta/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("##-"));
    }
    pb
}
