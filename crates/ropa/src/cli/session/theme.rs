//! Dialoguer theme and banner for the interactive session.

use console::{style, Style};
use dialoguer::theme::ColorfulTheme;

/// Returns a `ColorfulTheme` with Ropa's colors.
///
/// - Prompt prefix: magenta `?`
/// - Active item indicator: magenta `▸`
/// - Success prefix: green `✓`
/// - Error prefix: red `✗`
pub fn ropa_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("?".to_string()).for_stderr().magenta(),
        prompt_style: Style::new().for_stderr().bold(),
        prompt_suffix: style("›".to_string()).for_stderr().bright().black(),
        active_item_prefix: style("▸".to_string()).for_stderr().magenta(),
        active_item_style: Style::new().for_stderr().magenta(),
        success_prefix: style("✓".to_string()).for_stderr().green(),
        success_suffix: style("·".to_string()).for_stderr().bright().black(),
        error_prefix: style("✗".to_string()).for_stderr().red(),
        error_style: Style::new().for_stderr().red(),
        values_style: Style::new().for_stderr().green(),
        ..ColorfulTheme::default()
    }
}

/// Prints the banner to stderr.
pub fn print_banner() {
    let version_line = format!("Ropa IA v{}", ropa_core::VERSION);
    let tagline = "Tu armario, etiquetado por IA";

    let inner_width = tagline.chars().count() + 4;

    let top = format!("  ╔{:═<width$}╗", "", width = inner_width);
    let mid1 = format!("  ║{:^width$}║", version_line, width = inner_width);
    let mid2 = format!("  ║{:^width$}║", tagline, width = inner_width);
    let bot = format!("  ╚{:═<width$}╝", "", width = inner_width);

    let magenta = Style::new().for_stderr().magenta();

    eprintln!();
    eprintln!("{}", magenta.apply_to(&top));
    eprintln!("{}", magenta.apply_to(&mid1));
    eprintln!("{}", magenta.apply_to(&mid2));
    eprintln!("{}", magenta.apply_to(&bot));
    eprintln!();
}

/// Inline success line (`✓ message`).
pub fn success(message: impl std::fmt::Display) {
    let green = Style::new().for_stderr().green();
    eprintln!("  {} {message}", green.apply_to("✓"));
}

/// Inline error line (`✗ message`).
pub fn error(message: impl std::fmt::Display) {
    let red = Style::new().for_stderr().red();
    eprintln!("  {} {message}", red.apply_to("✗"));
}

/// Inline warning line.
pub fn warn(message: impl std::fmt::Display) {
    let yellow = Style::new().for_stderr().yellow();
    eprintln!("  {}", yellow.apply_to(message));
}
