//! Interactive mode for a bare `vista` invocation on a terminal.
//!
//! A small menu that gathers the same options as `vista scan` and then runs
//! the same code path.

pub mod scan;
pub mod theme;

use console::Style;
use dialoguer::Select;
use vista_core::Config;

/// Map a dialoguer result to `Ok(None)` on Ctrl+C so flows can exit cleanly.
fn handle_interrupt<T>(result: dialoguer::Result<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

const MENU_ITEMS: &[&str] = &["Scan a folder", "Show configuration", "Exit"];

/// Entry point for interactive mode.
pub async fn run(config: &Config) -> anyhow::Result<()> {
    theme::print_banner();
    let theme = theme::vista_theme();

    loop {
        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(MENU_ITEMS)
            .default(0)
            .interact_opt()?;

        match selection {
            Some(0) => scan::guided_scan(config).await?,
            Some(1) => show_config(config),
            // Exit, Esc or Ctrl+C
            _ => break,
        }
    }

    Ok(())
}

fn show_config(config: &Config) {
    let dim = Style::new().for_stderr().dim();
    let label = Style::new().for_stderr().bold();

    let path = Config::default_path();
    let note = if path.exists() {
        "(exists)"
    } else {
        "(using defaults)"
    };

    eprintln!();
    eprintln!(
        "    {:<16} {} {}",
        label.apply_to("Config file:"),
        path.display(),
        dim.apply_to(note)
    );
    eprintln!(
        "    {:<16} {} at once",
        label.apply_to("Concurrency:"),
        config.processing.concurrency
    );
    eprintln!(
        "    {:<16} {}",
        label.apply_to("Formats:"),
        config.processing.supported_formats.join(", ")
    );
    eprintln!(
        "    {:<16} {}px {} (quality {})",
        label.apply_to("Thumbnail:"),
        config.thumbnail.size,
        config.thumbnail.format,
        config.thumbnail.quality
    );
    eprintln!(
        "    {:<16} {}",
        label.apply_to("Content id:"),
        config.hash.algorithm
    );
    eprintln!();
}
