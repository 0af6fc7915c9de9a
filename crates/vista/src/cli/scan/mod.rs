//! The `vista scan` command.

mod batch;
pub mod types;

pub use types::{HashKind, OutputFormat, ThumbnailKind};

use clap::Args;
use std::path::PathBuf;
use vista_core::Config;

use batch::run_scan;

/// Arguments for the `scan` command.
#[derive(Args, Debug, Clone, Default)]
pub struct ScanArgs {
    /// Folder (or single image) to scan
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format [default: from config, else json]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Maximum number of images processed at once [default: from config, else 5]
    #[arg(short, long, env = "VISTA_CONCURRENCY")]
    pub parallel: Option<usize>,

    /// Longest thumbnail edge in pixels
    #[arg(long)]
    pub thumbnail_size: Option<u32>,

    /// Thumbnail encoding
    #[arg(long, value_enum)]
    pub thumbnail_format: Option<ThumbnailKind>,

    /// Digest used for content ids
    #[arg(long, value_enum)]
    pub hash: Option<HashKind>,

    /// Descend into subfolders
    #[arg(short, long)]
    pub recursive: bool,

    /// Report failed images and keep going instead of aborting the scan
    #[arg(long)]
    pub keep_going: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl ScanArgs {
    /// Merge CLI overrides onto the loaded config and validate the result.
    pub fn effective_config(&self, base: &Config) -> anyhow::Result<Config> {
        let mut config = base.clone();
        if let Some(parallel) = self.parallel {
            config.processing.concurrency = parallel;
        }
        if self.recursive {
            config.processing.recursive = true;
        }
        if let Some(size) = self.thumbnail_size {
            config.thumbnail.size = size;
        }
        if let Some(format) = self.thumbnail_format {
            config.thumbnail.format = format.into();
        }
        if let Some(hash) = self.hash {
            config.hash.algorithm = hash.into();
        }
        if self.pretty {
            config.output.pretty = true;
        }
        config.validate()?;
        Ok(config)
    }

    /// Output format from the flag, falling back to `[output] format`.
    pub fn output_format(&self, config: &Config) -> anyhow::Result<vista_core::OutputFormat> {
        match self.format {
            Some(format) => Ok(format.into()),
            None => vista_core::OutputFormat::parse(&config.output.format).ok_or_else(|| {
                anyhow::anyhow!(
                    "Invalid output.format '{}' in config (expected json or jsonl)",
                    config.output.format
                )
            }),
        }
    }
}

/// Execute the scan command.
pub async fn execute(args: ScanArgs, config: &Config) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input path not found: {}", args.input.display());
    }

    let config = args.effective_config(config)?;
    let format = args.output_format(&config)?;
    run_scan(&args, &config, format).await
}
