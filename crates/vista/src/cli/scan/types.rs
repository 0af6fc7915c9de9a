//! CLI enum types for the scan command.

use clap::ValueEnum;
use vista_core::config::{DigestAlgorithm, ThumbnailFormat};

/// Supported output formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON array
    Json,
    /// One JSON object per line (newline-delimited)
    Jsonl,
}

impl From<OutputFormat> for vista_core::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => Self::Json,
            OutputFormat::Jsonl => Self::JsonLines,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Jsonl => write!(f, "jsonl"),
        }
    }
}

/// Thumbnail encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThumbnailKind {
    Jpeg,
    Png,
    Webp,
}

impl From<ThumbnailKind> for ThumbnailFormat {
    fn from(kind: ThumbnailKind) -> Self {
        match kind {
            ThumbnailKind::Jpeg => Self::Jpeg,
            ThumbnailKind::Png => Self::Png,
            ThumbnailKind::Webp => Self::Webp,
        }
    }
}

/// Content id digests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum HashKind {
    /// BLAKE3 (64 hex chars)
    Blake3,
    /// CRC-32 (8 hex chars, fastest)
    Crc32,
}

impl From<HashKind> for DigestAlgorithm {
    fn from(kind: HashKind) -> Self {
        match kind {
            HashKind::Blake3 => Self::Blake3,
            HashKind::Crc32 => Self::Crc32,
        }
    }
}
