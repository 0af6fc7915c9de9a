//! Thumbnail generation.
//!
//! Decodes a source image, shrinks it so its longest edge fits the requested
//! size, and re-encodes it to the configured format. Small images are never
//! upscaled.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;
use std::path::Path;
use std::time::Duration;
use tokio::time::timeout;

use crate::config::{LimitsConfig, ThumbnailConfig, ThumbnailFormat};
use crate::error::{PipelineError, PipelineResult};

use super::decode::ImageDecoder;

/// Generates encoded preview images.
#[derive(Debug, Clone)]
pub struct ThumbnailGenerator {
    decoder: ImageDecoder,
    config: ThumbnailConfig,
    limits: LimitsConfig,
}

impl ThumbnailGenerator {
    pub fn new(config: ThumbnailConfig, limits: LimitsConfig) -> Self {
        Self {
            decoder: ImageDecoder::new(limits.clone()),
            config,
            limits,
        }
    }

    /// Configured longest edge in pixels.
    pub fn size(&self) -> u32 {
        self.config.size
    }

    /// Decode `path` and return the encoded preview bytes.
    ///
    /// The longest edge of the result is at most `max_dimension`.
    pub async fn generate(&self, path: &Path, max_dimension: u32) -> PipelineResult<Vec<u8>> {
        if max_dimension == 0 {
            return Err(PipelineError::InvalidArgument(
                "thumbnail max_dimension must be > 0".into(),
            ));
        }

        let decoded = self.decoder.decode(path).await?;
        tracing::trace!(
            "  Decoded {:?} as {:?} ({}x{})",
            path,
            decoded.format,
            decoded.width,
            decoded.height
        );

        self.shrink_and_encode(decoded.image, max_dimension, path)
            .await
    }

    /// Resize and encode on the blocking pool, bounded by the decode timeout.
    async fn shrink_and_encode(
        &self,
        image: DynamicImage,
        max_dimension: u32,
        path: &Path,
    ) -> PipelineResult<Vec<u8>> {
        let format = self.config.format;
        let quality = self.config.quality;
        let path_owned = path.to_path_buf();
        let timeout_ms = self.limits.decode_timeout_ms;

        let encode_result = timeout(
            Duration::from_millis(timeout_ms),
            tokio::task::spawn_blocking(move || {
                let preview = shrink_to_fit(image, max_dimension);
                encode(&preview, format, quality, &path_owned)
            }),
        )
        .await;

        match encode_result {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(PipelineError::Encode {
                path: path.to_path_buf(),
                message: format!("Task join error: {}", e),
            }),
            Err(_) => Err(PipelineError::Timeout {
                path: path.to_path_buf(),
                stage: "encode".to_string(),
                timeout_ms,
            }),
        }
    }

    /// Like [`generate`](Self::generate), wrapped as a base64 `data:` URI.
    pub async fn generate_data_uri(&self, path: &Path, max_dimension: u32) -> PipelineResult<String> {
        let bytes = self.generate(path, max_dimension).await?;
        Ok(data_uri(self.config.format, &bytes))
    }
}

/// Wrap encoded image bytes as `data:<mime>;base64,<payload>`.
pub fn data_uri(format: ThumbnailFormat, bytes: &[u8]) -> String {
    mime_data_uri(format.mime_type(), bytes)
}

pub(crate) fn mime_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

fn shrink_to_fit(image: DynamicImage, max_dimension: u32) -> DynamicImage {
    let (width, height) = image.dimensions();
    if width.max(height) <= max_dimension {
        image
    } else {
        // Keeps aspect ratio; longest edge becomes max_dimension
        image.thumbnail(max_dimension, max_dimension)
    }
}

fn encode(
    image: &DynamicImage,
    format: ThumbnailFormat,
    quality: u8,
    path: &Path,
) -> PipelineResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    let result = match format {
        // JPEG has no alpha channel
        ThumbnailFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8())
            .write_with_encoder(JpegEncoder::new_with_quality(&mut buffer, quality)),
        ThumbnailFormat::Png => image.write_to(&mut buffer, ImageFormat::Png),
        // The WebP encoder only accepts 8-bit RGB(A)
        ThumbnailFormat::Webp => {
            DynamicImage::ImageRgba8(image.to_rgba8()).write_to(&mut buffer, ImageFormat::WebP)
        }
    };
    result.map_err(|e| PipelineError::Encode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(buffer.into_inner())
}
