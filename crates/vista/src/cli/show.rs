//! The `vista show` command: a full-size image as a `data:` URI.

use clap::Args;
use std::path::PathBuf;
use vista_core::pipeline::source_data_uri;
use vista_core::Config;

/// Arguments for the `show` command.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Image file to read
    pub file: PathBuf,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the show command.
pub async fn execute(args: ShowArgs, config: &Config) -> anyhow::Result<()> {
    let uri = source_data_uri(&args.file, &config.limits).await?;

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, format!("{uri}\n")).await?;
            tracing::info!("Wrote {:?} to {:?}", args.file, path);
        }
        None => println!("{uri}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_writes_data_uri_file() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("photo.png");
        image::RgbImage::from_pixel(6, 4, image::Rgb([1, 2, 3]))
            .save(&image)
            .unwrap();
        let output = dir.path().join("photo.txt");

        let args = ShowArgs {
            file: image,
            output: Some(output.clone()),
        };
        execute(args, &Config::default()).await.unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("data:image/png;base64,"));
        assert!(written.ends_with('\n'));
    }

    #[tokio::test]
    async fn test_missing_file_errors() {
        let args = ShowArgs {
            file: PathBuf::from("/nonexistent/vista/photo.jpg"),
            output: None,
        };
        assert!(execute(args, &Config::default()).await.is_err());
    }
}
