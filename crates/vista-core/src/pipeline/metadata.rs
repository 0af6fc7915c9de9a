//! EXIF lookup for a single image.
//!
//! Lenient: files without an EXIF block, or with a malformed one, yield `None`.

use exif::{Exif, In, Reader, Tag, Value};
use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;

use crate::types::ExifData;

/// Reads camera metadata from image containers.
pub struct MetadataExtractor;

impl MetadataExtractor {
    /// Read EXIF fields from the file at `path`.
    pub fn extract(path: &Path) -> Option<ExifData> {
        let file = File::open(path).ok()?;
        Self::extract_from(&mut BufReader::new(file))
    }

    /// Read EXIF fields from any seekable container (JPEG, PNG, WebP, TIFF...).
    pub fn extract_from<R: BufRead + Seek>(reader: &mut R) -> Option<ExifData> {
        let exif = Reader::new().read_from_container(reader).ok()?;
        let fields = Fields(&exif);

        let data = ExifData {
            captured_at: fields
                .text(Tag::DateTimeOriginal)
                .or_else(|| fields.text(Tag::DateTime)),
            camera_make: fields.text(Tag::Make),
            camera_model: fields.text(Tag::Model),
            gps_latitude: fields.coordinate(Tag::GPSLatitude, Tag::GPSLatitudeRef),
            gps_longitude: fields.coordinate(Tag::GPSLongitude, Tag::GPSLongitudeRef),
            iso: fields.integer(Tag::PhotographicSensitivity),
            aperture: fields.text(Tag::FNumber).map(|f| format!("f/{}", f)),
            shutter_speed: fields.text(Tag::ExposureTime),
            focal_length: fields.rational(Tag::FocalLength).map(|mm| mm as f32),
            orientation: fields.integer(Tag::Orientation),
        };

        (!is_blank(&data)).then_some(data)
    }
}

fn is_blank(data: &ExifData) -> bool {
    data.captured_at.is_none()
        && data.camera_make.is_none()
        && data.camera_model.is_none()
        && data.gps_latitude.is_none()
        && data.gps_longitude.is_none()
        && data.iso.is_none()
        && data.aperture.is_none()
        && data.shutter_speed.is_none()
        && data.focal_length.is_none()
        && data.orientation.is_none()
}

/// Typed accessors over the primary IFD.
struct Fields<'a>(&'a Exif);

impl Fields<'_> {
    fn text(&self, tag: Tag) -> Option<String> {
        let field = self.0.get_field(tag, In::PRIMARY)?;
        let value = field.display_value().to_string();
        let value = value.trim_matches('"').trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    fn integer(&self, tag: Tag) -> Option<u32> {
        match &self.0.get_field(tag, In::PRIMARY)?.value {
            Value::Short(v) => v.first().map(|&x| u32::from(x)),
            Value::Long(v) => v.first().copied(),
            _ => None,
        }
    }

    fn rational(&self, tag: Tag) -> Option<f64> {
        match &self.0.get_field(tag, In::PRIMARY)?.value {
            Value::Rational(v) => v.first().map(|r| r.to_f64()),
            _ => None,
        }
    }

    /// Degrees/minutes/seconds to signed decimal degrees.
    fn coordinate(&self, value_tag: Tag, ref_tag: Tag) -> Option<f64> {
        let dms = match &self.0.get_field(value_tag, In::PRIMARY)?.value {
            Value::Rational(v) if v.len() >= 3 => {
                v[0].to_f64() + v[1].to_f64() / 60.0 + v[2].to_f64() / 3600.0
            }
            _ => return None,
        };
        let hemisphere = self.text(ref_tag)?;
        if hemisphere.starts_with('S') || hemisphere.starts_with('W') {
            Some(-dms)
        } else {
            Some(dms)
        }
    }
}
