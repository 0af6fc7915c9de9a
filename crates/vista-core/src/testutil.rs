//! Shared helpers for unit tests.

use std::path::{Path, PathBuf};

/// Write a small gradient image to `dir/name`; the format follows the extension.
pub(crate) fn write_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let salt = name.bytes().fold(0u8, |acc, b| acc.wrapping_add(b));
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, salt])
    });
    let path = dir.join(name);
    img.save(&path).unwrap();
    path
}
