//! Sub-configuration structs and their defaults.

use serde::{Deserialize, Serialize};

/// Processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Maximum number of files processed at once
    pub concurrency: usize,

    /// Recognized image extensions (case-insensitive, without the dot)
    pub supported_formats: Vec<String>,

    /// Descend into subdirectories when listing a directory
    pub recursive: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            concurrency: 5,
            supported_formats: vec![
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
                "gif".to_string(),
            ],
            recursive: false,
        }
    }
}

impl ProcessingConfig {
    /// Check whether `ext` (no leading dot) is a recognized image extension.
    pub fn is_supported_extension(&self, ext: &str) -> bool {
        self.supported_formats
            .iter()
            .any(|fmt| fmt.eq_ignore_ascii_case(ext))
    }
}

/// Digest used for content identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    /// BLAKE3, 64 hex characters
    #[default]
    Blake3,
    /// CRC-32 (IEEE), 8 hex characters
    Crc32,
}

impl DigestAlgorithm {
    /// Length of the hex digest this algorithm produces.
    pub fn hex_len(self) -> usize {
        match self {
            Self::Blake3 => 64,
            Self::Crc32 => 8,
        }
    }
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blake3 => write!(f, "blake3"),
            Self::Crc32 => write!(f, "crc32"),
        }
    }
}

/// Content identity settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HashConfig {
    /// Digest algorithm
    pub algorithm: DigestAlgorithm,
}

/// Encoded format of generated thumbnails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThumbnailFormat {
    #[default]
    Jpeg,
    Png,
    Webp,
}

impl ThumbnailFormat {
    /// MIME type used in data URIs.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
        }
    }
}

impl std::fmt::Display for ThumbnailFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Jpeg => write!(f, "jpeg"),
            Self::Png => write!(f, "png"),
            Self::Webp => write!(f, "webp"),
        }
    }
}

/// Thumbnail generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailConfig {
    /// Longest edge of the preview in pixels
    pub size: u32,

    /// Output format
    pub format: ThumbnailFormat,

    /// JPEG quality (1-100); ignored by other formats
    pub quality: u8,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            size: 200,
            format: ThumbnailFormat::Jpeg,
            quality: 80,
        }
    }
}

/// Resource limits to protect against problematic inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum file size in megabytes
    pub max_file_size_mb: u64,

    /// Maximum source image dimension (width or height)
    pub max_image_dimension: u32,

    /// Decode + resize + encode timeout in milliseconds
    pub decode_timeout_ms: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 100,
            max_image_dimension: 20000,
            decode_timeout_ms: 10000,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format ("json" or "jsonl")
    pub format: String,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            pretty: false,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
