//! Core data types produced by the gallery pipeline.

use serde::{Deserialize, Serialize};

/// One gallery entry.
///
/// Serialized with camelCase keys, which is what UI consumers expect:
/// `{"id": ..., "path": ..., "displayName": ..., "thumbnail": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    /// Content digest (hex). Identical files share an id.
    pub id: String,

    /// Full path to the source file
    pub path: String,

    /// File name without its extension
    pub display_name: String,

    /// Thumbnail as a `data:` URI
    pub thumbnail: String,
}

/// Point-in-time progress of a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Tasks finished so far
    pub completed: usize,

    /// Number of eligible files in the batch
    pub total: usize,

    /// File name of the task that finished most recently
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
}

impl ProgressSnapshot {
    /// Fraction complete in `[0.0, 1.0]`. An empty batch counts as done.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

/// EXIF metadata extracted from an image.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExifData {
    /// When the photo was captured, as recorded by the camera
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<String>,

    /// Camera manufacturer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_make: Option<String>,

    /// Camera model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_model: Option<String>,

    /// GPS latitude (decimal degrees)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gps_latitude: Option<f64>,

    /// GPS longitude (decimal degrees)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gps_longitude: Option<f64>,

    /// ISO sensitivity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iso: Option<u32>,

    /// Aperture (e.g., "f/1.8")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aperture: Option<String>,

    /// Shutter speed (e.g., "1/1000")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shutter_speed: Option<String>,

    /// Focal length in mm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focal_length: Option<f32>,

    /// Image orientation (1-8)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<u32>,
}

/// Counts for a finished batch.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BatchStats {
    /// Files that produced a gallery item
    pub succeeded: usize,

    /// Files that failed (only non-zero in keep-going mode)
    pub failed: usize,

    /// Listed files dropped for having an unrecognized extension
    pub ignored: usize,

    /// Wall-clock time in seconds
    pub total_seconds: f64,
}

impl BatchStats {
    /// Files per second over the whole run.
    pub fn rate(&self) -> f64 {
        if self.total_seconds > 0.0 {
            (self.succeeded + self.failed) as f64 / self.total_seconds
        } else {
            0.0
        }
    }
}
