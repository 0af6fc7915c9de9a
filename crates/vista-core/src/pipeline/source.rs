//! Full-size source images for viewing.

use image::ImageFormat;
use std::path::Path;

use crate::config::LimitsConfig;
use crate::error::{PipelineError, PipelineResult};

use super::thumbnail::mime_data_uri;
use super::validate::Validator;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Read the whole file at `path` and wrap it as a base64 `data:` URI.
///
/// The MIME type is sniffed from the content, then guessed from the
/// extension. Files over the size limit are rejected before reading.
pub async fn source_data_uri(path: &Path, limits: &LimitsConfig) -> PipelineResult<String> {
    Validator::new(limits.clone()).validate(path).await?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| PipelineError::io(path, e))?;
    let mime = sniff_mime(&bytes, path);
    tracing::debug!("Read {} bytes of {} from {:?}", bytes.len(), mime, path);

    Ok(mime_data_uri(mime, &bytes))
}

fn sniff_mime(bytes: &[u8], path: &Path) -> &'static str {
    image::guess_format(bytes)
        .or_else(|_| ImageFormat::from_path(path))
        .map(|f| f.to_mime_type())
        .unwrap_or(FALLBACK_MIME)
}
