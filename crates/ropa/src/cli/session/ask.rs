//! Q&A screen: free-form questions answered from the tag store.

use console::Style;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use ropa_core::{Advisor, Session};
use std::time::Duration;

use super::theme::{self, ropa_theme};

/// Keep asking until the user submits an empty line or interrupts.
pub async fn guided_questions(session: &mut Session, advisor: &Advisor) -> anyhow::Result<()> {
    if session.tags().is_empty() {
        theme::warn("Todavía no hay ropa cargada. Subí imágenes o cargá un armario primero.");
        return Ok(());
    }

    let theme = ropa_theme();
    let dim = Style::new().for_stderr().dim();
    eprintln!("  {}", dim.apply_to("Enter vacío para volver al menú."));

    loop {
        let Some(question) = super::handle_interrupt(
            Input::<String>::with_theme(&theme)
                .with_prompt("¡Hacele una pregunta a nuestra IA que ya conoce tu ropa!")
                .allow_empty(true)
                .interact_text(),
        )?
        else {
            return Ok(());
        };
        if question.trim().is_empty() {
            return Ok(());
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.magenta} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message("Pensando...");
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = session.ask(&question, advisor).await;
        spinner.finish_and_clear();

        match result {
            Ok(Some(answer)) => {
                eprintln!();
                println!("{answer}");
                eprintln!();
            }
            Ok(None) => theme::warn("Esa pregunta ya la hiciste recién."),
            Err(e) => {
                tracing::error!("Question failed: {e}");
                theme::error(format!("La IA no pudo responder: {e}"));
            }
        }
    }
}
