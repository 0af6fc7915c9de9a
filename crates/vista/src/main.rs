//! Vista CLI - build image galleries with stable content ids and thumbnails.
//!
//! Vista scans a folder of photos and emits an ordered gallery: one record per
//! image with a content id, its path, a display name and an inline thumbnail.
//!
//! # Usage
//!
//! ```bash
//! # Scan a folder, gallery JSON to stdout
//! vista scan ./photos
//!
//! # Eight files at a time, JSONL to a file, don't stop on bad images
//! vista scan ./photos -p 8 -f jsonl -o gallery.jsonl --keep-going
//!
//! # Camera metadata for one file
//! vista exif ./photos/beach.jpg
//!
//! # Full-size image as a data: URI
//! vista show ./photos/beach.jpg
//!
//! # Guided mode
//! vista
//! ```

use clap::{Parser, Subcommand};
use std::io::IsTerminal;

mod cli;
mod logging;

/// Vista - build image galleries with stable content ids and thumbnails.
#[derive(Parser, Debug)]
#[command(name = "vista")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a folder and emit gallery items
    Scan(cli::scan::ScanArgs),

    /// Print EXIF metadata for an image as JSON
    Exif(cli::exif::ExifArgs),

    /// Print a full-size image as a base64 data: URI
    Show(cli::show::ShowArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't up yet, so config warnings go straight to stderr
    let config = match vista_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `vista config path`."
            );
            vista_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Vista v{}", vista_core::VERSION);

    match cli.command {
        Some(Commands::Scan(args)) => cli::scan::execute(args, &config).await,
        Some(Commands::Exif(args)) => cli::exif::execute(args).await,
        Some(Commands::Show(args)) => cli::show::execute(args, &config).await,
        Some(Commands::Config(args)) => cli::config::execute(args, &config).await,
        None if std::io::stdin().is_terminal() && std::io::stderr().is_terminal() => {
            cli::interactive::run(&config).await
        }
        None => {
            anyhow::bail!("No command given. Run `vista --help` for usage.")
        }
    }
}
