//! Guided scan: folder → concurrency → output → confirm → run.

use console::Style;
use dialoguer::{Confirm, Input, Select};
use std::path::PathBuf;
use vista_core::{BatchImageProcessor, Config};

use super::handle_interrupt;
use super::theme::vista_theme;
use crate::cli::scan::{self, OutputFormat, ScanArgs};

const OUTPUT_ITEMS: &[&str] = &["JSON file", "JSONL file", "JSON to stdout"];

/// Walk the user through a scan and hand off to `vista scan`.
pub async fn guided_scan(config: &Config) -> anyhow::Result<()> {
    let theme = vista_theme();
    let warn = Style::new().for_stderr().yellow();
    let dim = Style::new().for_stderr().dim();

    let (input, image_count) = loop {
        let Some(raw) = handle_interrupt(
            Input::<String>::with_theme(&theme)
                .with_prompt("Folder to scan")
                .interact_text(),
        )?
        else {
            return Ok(());
        };

        let path = expand_path(&raw);
        if !path.is_dir() {
            eprintln!("  {}", warn.apply_to(format!("Not a folder: {}", path.display())));
            continue;
        }

        let processor = BatchImageProcessor::new(config);
        let count = processor.filter_supported(processor.discover(&path)).len();
        if count == 0 {
            eprintln!("  {}", warn.apply_to("No supported images in that folder."));
            continue;
        }
        break (path, count);
    };
    eprintln!("  {}", dim.apply_to(format!("Found {} image(s)", image_count)));

    let Some(parallel) = handle_interrupt(
        Input::<usize>::with_theme(&theme)
            .with_prompt("Images to process at once")
            .default(config.processing.concurrency)
            .validate_with(|n: &usize| if *n > 0 { Ok(()) } else { Err("must be at least 1") })
            .interact_text(),
    )?
    else {
        return Ok(());
    };

    let Some(choice) = Select::with_theme(&theme)
        .with_prompt("Output")
        .items(OUTPUT_ITEMS)
        .default(0)
        .interact_opt()?
    else {
        return Ok(());
    };

    let (format, output) = match choice {
        0 | 1 => {
            let (format, default_name) = if choice == 0 {
                (OutputFormat::Json, "gallery.json")
            } else {
                (OutputFormat::Jsonl, "gallery.jsonl")
            };
            let Some(raw) = handle_interrupt(
                Input::<String>::with_theme(&theme)
                    .with_prompt("Output file")
                    .default(default_name.to_string())
                    .interact_text(),
            )?
            else {
                return Ok(());
            };
            (format, Some(expand_path(&raw)))
        }
        _ => (OutputFormat::Json, None),
    };

    let confirmed = Confirm::with_theme(&theme)
        .with_prompt(format!(
            "Scan {} image(s) from {}?",
            image_count,
            input.display()
        ))
        .default(true)
        .interact_opt()?;
    if confirmed != Some(true) {
        return Ok(());
    }

    let args = ScanArgs {
        input,
        output,
        format: Some(format),
        parallel: Some(parallel),
        ..ScanArgs::default()
    };

    // A failed scan returns to the menu instead of ending the session
    if let Err(e) = scan::execute(args, config).await {
        let err = Style::new().for_stderr().red();
        eprintln!("  {} {:#}", err.apply_to("✗"), e);
    }
    Ok(())
}

/// Expand a leading `~` and trim surrounding whitespace.
fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw.trim()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_path_tilde() {
        let expanded = expand_path("  ~/photos ");
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.ends_with("photos"));
    }

    #[test]
    fn test_expand_path_plain() {
        assert_eq!(expand_path("/tmp/pics"), PathBuf::from("/tmp/pics"));
    }
}
