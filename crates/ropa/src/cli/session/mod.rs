//! Interactive wardrobe session — the bare `ropa` invocation.
//!
//! Asks for the password, then loops over a menu where every selection is one
//! user action handled against the same [`Session`].

pub mod ask;
pub mod gallery;
pub mod gate;
pub mod theme;
pub mod upload;
pub mod wardrobe;

use console::Style;
use dialoguer::Select;
use ropa_core::{AccessGate, Advisor, Config, LlmProvider, OpenAiProvider, Session, Tagger};
use std::sync::Arc;

/// Convert a dialoguer result into `Ok(Some(value))` on success, `Ok(None)` on
/// interrupt (Ctrl+C / terminal disconnect), and `Err` for other I/O failures.
fn handle_interrupt<T>(result: dialoguer::Result<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// The model-facing half of the session: built once, shared by handlers.
pub struct Assistants {
    pub tagger: Tagger,
    pub advisor: Advisor,
}

impl Assistants {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.api_key()?;
        let provider = Arc::new(OpenAiProvider::from_config(&config.llm, &api_key));
        tracing::info!(
            provider = provider.name(),
            model = %config.llm.model,
            endpoint = %config.llm.endpoint,
            "Model provider ready"
        );
        Ok(Self {
            tagger: Tagger::new(provider.clone(), &config.tagging),
            advisor: Advisor::new(provider, config.qa.temperature),
        })
    }
}

const MENU_ITEMS: &[&str] = &[
    "Subir imágenes",
    "Ver tu ropa",
    "Hacerle una pregunta a la IA",
    "Cargar armario (JSON)",
    "Descargar armario (JSON)",
    "Ver configuración",
    "Salir",
];

/// Entry point for the interactive session.
pub async fn run(config: &Config) -> anyhow::Result<()> {
    theme::print_banner();

    let mut session = Session::new(AccessGate::new(config.password()?));
    if !gate::unlock(&mut session)? {
        return Ok(());
    }

    let assistants = Assistants::from_config(config)?;
    let theme = theme::ropa_theme();

    loop {
        print_summary(&session);

        let selection = Select::with_theme(&theme)
            .with_prompt("¿Qué querés hacer?")
            .items(MENU_ITEMS)
            .default(0)
            .interact_opt()?;

        match selection {
            Some(0) => upload::guided_upload(&mut session, &assistants.tagger, config).await?,
            Some(1) => gallery::browse(&session, config)?,
            Some(2) => ask::guided_questions(&mut session, &assistants.advisor).await?,
            Some(3) => wardrobe::import(&mut session, config)?,
            Some(4) => wardrobe::export(&session, config)?,
            Some(5) => show_config(config),
            Some(6) | None => break,
            _ => unreachable!(),
        }
    }

    tracing::info!(items = session.tags().len(), "Session ended");
    Ok(())
}

fn print_summary(session: &Session) {
    let dim = Style::new().for_stderr().dim();
    eprintln!();
    eprintln!(
        "  {}",
        dim.apply_to(format!(
            "{} prenda(s) etiquetada(s) · {} foto(s) en esta sesión",
            session.tags().len(),
            session.images().len()
        ))
    );
}

/// Summary of the settings that shape this session. Secrets are not shown.
fn show_config(config: &Config) {
    let label = Style::new().for_stderr().bold();
    let cyan = Style::new().for_stderr().cyan();

    eprintln!();
    eprintln!("  {}", cyan.apply_to("Configuración actual:"));
    eprintln!();
    eprintln!("    {:<20} {}", label.apply_to("Modelo:"), config.llm.model);
    eprintln!("    {:<20} {}", label.apply_to("Endpoint:"), config.llm.endpoint);
    eprintln!(
        "    {:<20} {}px, temperatura {}",
        label.apply_to("Etiquetado:"),
        config.tagging.thumbnail_size,
        Tagger::TEMPERATURE
    );
    eprintln!(
        "    {:<20} temperatura {}",
        label.apply_to("Preguntas:"),
        config.qa.temperature
    );
    eprintln!(
        "    {:<20} {} columnas, {} filas por página",
        label.apply_to("Galería:"),
        config.gallery.columns,
        config.gallery.rows_per_page
    );
    eprintln!(
        "    {:<20} {}",
        label.apply_to("Formatos:"),
        config.upload.supported_formats.join(", ")
    );
}
