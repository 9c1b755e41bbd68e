//! Gallery screen: the wardrobe as a paged grid in the terminal, with an
//! option to save the full gallery (with photos) as an HTML page.

use console::{pad_str, style, Alignment, Term};
use dialoguer::Select;
use ropa_core::{Config, Gallery, GalleryCell, ImageSource, Session};

use super::theme::{self, ropa_theme};
use super::wardrobe::prompt_path;

const CARD_WIDTH: usize = 30;
const CARD_GAP: &str = "  ";

/// Page through the gallery until the user goes back.
pub fn browse(session: &Session, config: &Config) -> anyhow::Result<()> {
    if session.tags().is_empty() {
        theme::warn("Todavía no hay ropa para mostrar.");
        return Ok(());
    }

    let gallery = Gallery::new(config.gallery.columns, config.gallery.rows_per_page);
    let pages = gallery.page_count(session.tags().len());
    let theme = ropa_theme();
    let mut page = 0;

    loop {
        eprintln!();
        eprintln!(
            "  {} {}",
            style("Tu Ropa").bold().for_stderr(),
            style(format!("(página {} de {pages})", page + 1)).dim().for_stderr()
        );
        eprintln!();
        for row in gallery.page(session.tags(), session.images(), page) {
            eprint!("{}", render_row(&row, gallery.columns(), terminal_width()));
        }

        let mut actions = Vec::new();
        if page + 1 < pages {
            actions.push(Action::Next);
        }
        if page > 0 {
            actions.push(Action::Previous);
        }
        actions.push(Action::SaveHtml);
        actions.push(Action::Back);

        let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
        let choice = Select::with_theme(&theme)
            .with_prompt("Galería")
            .items(&labels)
            .default(0)
            .interact_opt()?;

        match choice.map(|i| actions[i]) {
            Some(Action::Next) => page += 1,
            Some(Action::Previous) => page -= 1,
            Some(Action::SaveHtml) => save_html(session, &gallery, config)?,
            Some(Action::Back) | None => return Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Next,
    Previous,
    SaveHtml,
    Back,
}

impl Action {
    fn label(self) -> &'static str {
        match self {
            Action::Next => "Página siguiente",
            Action::Previous => "Página anterior",
            Action::SaveHtml => "Guardar galería con fotos (HTML)",
            Action::Back => "Volver",
        }
    }
}

fn save_html(session: &Session, gallery: &Gallery, config: &Config) -> anyhow::Result<()> {
    let Some(path) = prompt_path("Guardar galería en", &config.gallery_path())? else {
        return Ok(());
    };
    match std::fs::write(&path, gallery.render_html(session.tags(), session.images())) {
        Ok(()) => theme::success(format!("Galería guardada en {}", path.display())),
        Err(e) => theme::error(format!("No se pudo guardar la galería: {e}")),
    }
    Ok(())
}

fn terminal_width() -> usize {
    Term::stderr().size_checked().map_or(80, |(_, cols)| cols as usize)
}

/// Render one grid row as side-by-side cards, or as caption lines when the
/// terminal is too narrow for the grid.
fn render_row(row: &[GalleryCell<'_>], columns: usize, width: usize) -> String {
    let grid_width = 2 + columns * CARD_WIDTH + (columns - 1) * CARD_GAP.len();
    if width < grid_width {
        return row
            .iter()
            .map(|cell| format!("  {} · {}\n", image_label(cell), cell.caption()))
            .collect::<String>()
            + "\n";
    }

    let cards: Vec<Vec<String>> = row.iter().map(card_lines).collect();
    let height = cards.iter().map(Vec::len).max().unwrap_or(0);

    let mut out = String::new();
    for line in 0..height {
        out.push_str("  ");
        let cells: Vec<String> = cards
            .iter()
            .map(|card| {
                let text = card.get(line).map(String::as_str).unwrap_or("");
                pad_str(text, CARD_WIDTH, Alignment::Left, Some("…")).into_owned()
            })
            .collect();
        out.push_str(cells.join(CARD_GAP).trim_end());
        out.push('\n');
    }
    out.push('\n');
    out
}

fn card_lines(cell: &GalleryCell<'_>) -> Vec<String> {
    let mut lines = vec![
        style(cell.id.as_str()).bold().for_stderr().to_string(),
        image_label(cell),
    ];
    lines.extend(cell.record.values().iter().map(|v| format!("  {v}")));
    lines
}

fn image_label(cell: &GalleryCell<'_>) -> String {
    match cell.image {
        ImageSource::Uploaded(image) => format!("[foto {} KB]", image.size().div_ceil(1024)),
        ImageSource::Placeholder => "[sin imagen]".to_string(),
    }
}
