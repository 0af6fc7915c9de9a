//! Content identity: a stable digest of a file's bytes.
//!
//! The id is for display and grouping, not security. BLAKE3 is the default;
//! CRC-32 trades collision resistance for speed.

use std::path::Path;

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::config::DigestAlgorithm;
use crate::error::{PipelineError, PipelineResult};

const READ_BUFFER_SIZE: usize = 64 * 1024;

enum Digest {
    Blake3(Box<blake3::Hasher>),
    Crc32(crc32fast::Hasher),
}

impl Digest {
    fn new(algorithm: DigestAlgorithm) -> Self {
        match algorithm {
            DigestAlgorithm::Blake3 => Self::Blake3(Box::new(blake3::Hasher::new())),
            DigestAlgorithm::Crc32 => Self::Crc32(crc32fast::Hasher::new()),
        }
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            Self::Blake3(hasher) => {
                hasher.update(data);
            }
            Self::Crc32(hasher) => hasher.update(data),
        }
    }

    fn finalize_hex(self) -> String {
        match self {
            Self::Blake3(hasher) => hasher.finalize().to_hex().to_string(),
            Self::Crc32(hasher) => format!("{:08x}", hasher.finalize()),
        }
    }
}

/// Computes content ids with a fixed digest algorithm.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentIdentity {
    algorithm: DigestAlgorithm,
}

impl ContentIdentity {
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Digest everything `reader` yields, as lowercase hex.
    ///
    /// The stream is read to EOF before the digest is finalized; any read
    /// error (including a stream cut short) is returned as is.
    pub async fn identify<R>(&self, mut reader: R) -> std::io::Result<String>
    where
        R: AsyncRead + Unpin,
    {
        let mut digest = Digest::new(self.algorithm);
        let mut buffer = vec![0u8; READ_BUFFER_SIZE];
        loop {
            let bytes_read = reader.read(&mut buffer).await?;
            if bytes_read == 0 {
                break;
            }
            digest.update(&buffer[..bytes_read]);
        }
        Ok(digest.finalize_hex())
    }

    /// Digest a file on disk, streaming it in 64KB chunks.
    pub async fn identify_file(&self, path: &Path) -> PipelineResult<String> {
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|e| PipelineError::io(path, e))?;
        self.identify(file)
            .await
            .map_err(|e| PipelineError::io(path, e))
    }

    /// Digest an in-memory buffer.
    pub fn identify_bytes(&self, data: &[u8]) -> String {
        let mut digest = Digest::new(self.algorithm);
        digest.update(data);
        digest.finalize_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use tokio::io::ReadBuf;

    /// Yields one chunk, then fails as if the file were cut short.
    struct Truncated {
        sent: bool,
    }

    impl AsyncRead for Truncated {
        fn poll_read(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            if self.sent {
                return Poll::Ready(Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "truncated",
                )));
            }
            self.sent = true;
            buf.put_slice(b"partial");
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn test_blake3_known_vector() {
        let identity = ContentIdentity::new(DigestAlgorithm::Blake3);
        let id = identity.identify(&b""[..]).await.unwrap();
        assert_eq!(
            id,
            "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
        );
    }

    #[tokio::test]
    async fn test_crc32_known_vector() {
        let identity = ContentIdentity::new(DigestAlgorithm::Crc32);
        let id = identity.identify(&b"123456789"[..]).await.unwrap();
        assert_eq!(id, "cbf43926");
    }

    #[tokio::test]
    async fn test_fixed_length_per_algorithm() {
        for algorithm in [DigestAlgorithm::Blake3, DigestAlgorithm::Crc32] {
            let identity = ContentIdentity::new(algorithm);
            let id = identity.identify(&b"some image bytes"[..]).await.unwrap();
            assert_eq!(id.len(), algorithm.hex_len());
            assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[tokio::test]
    async fn test_file_matches_bytes_across_buffer_boundary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.bin");
        // Spans several read buffers and ends mid-buffer
        let data: Vec<u8> = (0..(READ_BUFFER_SIZE * 3 + 123))
            .map(|i| (i % 251) as u8)
            .collect();
        std::fs::write(&path, &data).unwrap();

        let identity = ContentIdentity::default();
        let from_file = identity.identify_file(&path).await.unwrap();
        assert_eq!(from_file, identity.identify_bytes(&data));
    }

    #[test]
    fn test_different_content_different_id() {
        let identity = ContentIdentity::default();
        assert_ne!(identity.identify_bytes(b"a"), identity.identify_bytes(b"b"));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let identity = ContentIdentity::default();
        let err = identity
            .identify_file(Path::new("/nonexistent/vista/ghost.jpg"))
            .await
            .unwrap_err();
        assert!(err.is_io());
        assert!(err.to_string().contains("ghost.jpg"));
    }

    #[tokio::test]
    async fn test_truncated_stream_fails() {
        let identity = ContentIdentity::default();
        let err = identity
            .identify(Truncated { sent: false })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
