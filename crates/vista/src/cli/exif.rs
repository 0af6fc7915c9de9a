//! The `vista exif` command: camera metadata for one image.

use clap::Args;
use std::path::PathBuf;
use vista_core::{ExifData, MetadataExtractor};

/// Arguments for the `exif` command.
#[derive(Args, Debug)]
pub struct ExifArgs {
    /// Image file to inspect
    pub file: PathBuf,

    /// Pretty-print the JSON
    #[arg(long)]
    pub pretty: bool,
}

/// Execute the exif command.
///
/// Prints the metadata as JSON, or `null` when the image carries none.
pub async fn execute(args: ExifArgs) -> anyhow::Result<()> {
    if !args.file.is_file() {
        anyhow::bail!("Not a file: {}", args.file.display());
    }

    let path = args.file.clone();
    let exif = tokio::task::spawn_blocking(move || MetadataExtractor::extract(&path)).await?;
    if exif.is_none() {
        tracing::info!("No EXIF metadata in {:?}", args.file);
    }

    println!("{}", render(exif.as_ref(), args.pretty)?);
    Ok(())
}

fn render(exif: Option<&ExifData>, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(&exif)
    } else {
        serde_json::to_string(&exif)
    }
}
