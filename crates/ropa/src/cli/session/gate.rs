//! Password prompt in front of the session.

use dialoguer::Password;
use ropa_core::{GateOutcome, Session};

use super::theme::{self, ropa_theme};

/// Prompt until the password is accepted.
///
/// Returns `Ok(false)` if the user interrupts instead.
pub fn unlock(session: &mut Session) -> anyhow::Result<bool> {
    let theme = ropa_theme();

    while !session.is_authenticated() {
        let Some(candidate) = super::handle_interrupt(
            Password::with_theme(&theme)
                .with_prompt("Introduce la contraseña")
                .allow_empty_password(true)
                .interact(),
        )?
        else {
            return Ok(false);
        };

        if session.authenticate(&candidate) == GateOutcome::Denied {
            theme::error("Contraseña incorrecta");
        }
    }

    Ok(true)
}
