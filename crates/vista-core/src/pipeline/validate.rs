//! Pre-flight checks run before a file is hashed.

use std::path::Path;

use crate::config::LimitsConfig;
use crate::error::{PipelineError, PipelineResult};

pub(crate) const BYTES_PER_MB: u64 = 1024 * 1024;

/// Validates files before processing.
#[derive(Debug, Clone)]
pub struct Validator {
    limits: LimitsConfig,
}

impl Validator {
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Check that `path` is a readable regular file within the size limit.
    ///
    /// Returns the file size in bytes.
    pub async fn validate(&self, path: &Path) -> PipelineResult<u64> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| PipelineError::io(path, e))?;

        if !metadata.is_file() {
            return Err(PipelineError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
            ));
        }

        let max_bytes = self.limits.max_file_size_mb.saturating_mul(BYTES_PER_MB);
        if metadata.len() > max_bytes {
            return Err(PipelineError::FileTooLarge {
                path: path.to_path_buf(),
                size_mb: metadata.len() / BYTES_PER_MB,
                max_mb: self.limits.max_file_size_mb,
            });
        }

        Ok(metadata.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_accepts_small_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ok.jpg");
        std::fs::write(&path, [0u8; 16]).unwrap();

        let size = Validator::new(LimitsConfig::default())
            .validate(&path)
            .await
            .unwrap();
        assert_eq!(size, 16);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = Validator::new(LimitsConfig::default())
            .validate(Path::new("/nonexistent/vista/x.jpg"))
            .await
            .unwrap_err();
        assert!(err.is_io());
    }

    #[tokio::test]
    async fn test_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = Validator::new(LimitsConfig::default())
            .validate(dir.path())
            .await
            .unwrap_err();
        assert!(err.is_io());
        assert!(err.to_string().contains("not a regular file"));
    }

    #[tokio::test]
    async fn test_rejects_oversized_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.png");
        let file = std::fs::File::create(&path).unwrap();
        file.set_len(2 * BYTES_PER_MB + 1).unwrap();

        let limits = LimitsConfig {
            max_file_size_mb: 2,
            ..LimitsConfig::default()
        };
        let err = Validator::new(limits).validate(&path).await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::FileTooLarge {
                size_mb: 2,
                max_mb: 2,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_huge_limit_does_not_overflow() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ok.jpg");
        std::fs::write(&path, [0u8; 16]).unwrap();

        let limits = LimitsConfig {
            max_file_size_mb: u64::MAX / 1000,
            ..LimitsConfig::default()
        };
        let size = Validator::new(limits).validate(&path).await.unwrap();
        assert_eq!(size, 16);
    }
}
