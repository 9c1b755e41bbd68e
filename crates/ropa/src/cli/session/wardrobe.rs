//! Wardrobe file screens: import (merge) and export (download).

use dialoguer::Input;
use ropa_core::{Config, Session};
use std::path::{Path, PathBuf};

use super::theme::{self, ropa_theme};

/// Prompt for a wardrobe JSON file and merge it into the session.
pub fn import(session: &mut Session, config: &Config) -> anyhow::Result<()> {
    let Some(path) = prompt_path("Archivo de armario a cargar", &config.export_path())? else {
        return Ok(());
    };

    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            theme::error(format!("Error al cargar el archivo: {e}"));
            return Ok(());
        }
    };

    match session.import_wardrobe(&bytes) {
        Ok(merged) => theme::success(format!("Metadata cargada correctamente ({merged} prenda(s))")),
        Err(e) => theme::error(format!("Error al cargar el archivo: {e}")),
    }
    Ok(())
}

/// Write the tag store as pretty JSON to a chosen path.
pub fn export(session: &Session, config: &Config) -> anyhow::Result<()> {
    if session.tags().is_empty() {
        theme::warn("No hay nada para descargar todavía.");
        return Ok(());
    }

    let Some(path) = prompt_path("Guardar armario en", &config.export_path())? else {
        return Ok(());
    };

    match write_export(session, &path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), items = session.tags().len(), "Wardrobe exported");
            theme::success(format!("Armario guardado en {}", path.display()));
        }
        Err(e) => theme::error(format!("No se pudo guardar: {e}")),
    }
    Ok(())
}

pub(crate) fn write_export(session: &Session, path: &Path) -> anyhow::Result<()> {
    let json = session.export_wardrobe()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)?;
    Ok(())
}

pub(crate) fn prompt_path(prompt: &str, default: &Path) -> anyhow::Result<Option<PathBuf>> {
    let theme = ropa_theme();
    let Some(raw) = super::handle_interrupt(
        Input::<String>::with_theme(&theme)
            .with_prompt(prompt)
            .default(default.display().to_string())
            .interact_text(),
    )?
    else {
        return Ok(None);
    };
    Ok(Some(PathBuf::from(shellexpand::tilde(raw.trim()).into_owned())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ropa_core::AccessGate;

    #[test]
    fn test_written_export_imports_back() {
        let mut session = Session::new(AccessGate::new("pw"));
        session.authenticate("pw");
        session
            .import_wardrobe(
                r#"{"red_jacket":{"categoria":"Casual","tipo":"Campera","color":"Rojo","temperatura":"5°C a 15°C","clima":"Frío"}}"#.as_bytes(),
            )
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("armario.json");
        write_export(&session, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\n  \"red_jacket\": {\n"));

        let mut fresh = Session::new(AccessGate::new("pw"));
        fresh.authenticate("pw");
        fresh.import_wardrobe(written.as_bytes()).unwrap();
        assert_eq!(fresh.tags(), session.tags());
    }
}
