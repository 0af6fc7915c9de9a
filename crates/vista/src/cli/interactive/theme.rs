//! Dialoguer theme and banner for interactive mode.

use console::{style, Style};
use dialoguer::theme::ColorfulTheme;

/// `ColorfulTheme` in Vista's colors: magenta prompts, green confirmations.
pub fn vista_theme() -> ColorfulTheme {
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

/// Print the version banner to stderr.
pub fn print_banner() {
    let lines = [
        format!("Vista v{}", vista_core::VERSION),
        "image galleries, in order".to_string(),
    ];
    let inner_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 6;
    let magenta = Style::new().for_stderr().magenta();

    eprintln!();
    eprintln!(
        "{}",
        magenta.apply_to(format!("  ┌{:─<width$}┐", "", width = inner_width))
    );
    for line in &lines {
        eprintln!(
            "{}",
            magenta.apply_to(format!("  │{:^width$}│", line, width = inner_width))
        );
    }
    eprintln!(
        "{}",
        magenta.apply_to(format!("  └{:─<width$}┘", "", width = inner_width))
    );
    eprintln!();
}
