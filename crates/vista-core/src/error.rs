//! Error types for the Vista gallery pipeline.
//!
//! Per-file failures fall into two families that callers care about: the
//! source could not be read (`is_io`), or its bytes could not be turned into a
//! thumbnail (`is_decode`). Both carry the offending path.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Vista operations.
#[derive(Error, Debug)]
pub enum VistaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Per-file pipeline errors.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Source file could not be opened or read to the end
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// Image bytes are corrupt or could not be decoded
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Unsupported image format
    #[error("Unsupported format for {path}: {format}")]
    UnsupportedFormat { path: PathBuf, format: String },

    /// Image dimensions exceed limit
    #[error("Image too large: {path} ({width}x{height} > {max_dim})")]
    ImageTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// Re-encoding the resized preview failed
    #[error("Encode error for {path}: {message}")]
    Encode { path: PathBuf, message: String },

    /// Operation timed out
    #[error("Timeout in {stage} stage for {path} after {timeout_ms}ms")]
    Timeout {
        path: PathBuf,
        stage: String,
        timeout_ms: u64,
    },

    /// A caller passed an argument outside its contract
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl PipelineError {
    /// Build an `Io` error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the source file itself was unreadable.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::FileTooLarge { .. })
    }

    /// True when the file was readable but its image payload was unusable.
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            Self::Decode { .. }
                | Self::UnsupportedFormat { .. }
                | Self::ImageTooLarge { .. }
                | Self::Encode { .. }
                | Self::Timeout { .. }
        )
    }

    /// The file this error refers to, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Io { path, .. }
            | Self::FileTooLarge { path, .. }
            | Self::Decode { path, .. }
            | Self::UnsupportedFormat { path, .. }
            | Self::ImageTooLarge { path, .. }
            | Self::Encode { path, .. }
            | Self::Timeout { path, .. } => Some(path),
            Self::InvalidArgument(_) => None,
        }
    }
}

/// Convenience type alias for Vista results.
pub type Result<T> = std::result::Result<T, VistaError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
