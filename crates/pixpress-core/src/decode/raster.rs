//! Raster decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{ImageFormat, ImageReader};

use super::{DecodeError, DecodedRaster, Orientation};
use crate::source::SourceImage;

/// Decode a source image into an upright raster.
///
/// The container format is sniffed from the bytes first; the declared MIME
/// type is only used when sniffing fails. EXIF orientation is applied so the
/// raster matches what a browser would display.
///
/// # Errors
///
/// * `DecodeError::Empty` for a zero-length input
/// * `DecodeError::UnsupportedFormat` when no decoder matches
/// * `DecodeError::CorruptedFile` for malformed or truncated data
/// * `DecodeError::ZeroDimensions` if the decoded raster is empty
pub fn decode_source(source: &SourceImage) -> Result<DecodedRaster, DecodeError> {
    let bytes = source.bytes();
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let format = detect_format(bytes, source.mime_type()).ok_or(DecodeError::UnsupportedFormat)?;
    let orientation = get_orientation(bytes);

    let img = ImageReader::with_format(Cursor::new(bytes), format)
        .decode()
        .map_err(|e| match e {
            image::ImageError::Unsupported(_) => DecodeError::UnsupportedFormat,
            other => DecodeError::CorruptedFile(other.to_string()),
        })?;

    log::debug!(
        "decoded {:?} source: {}x{} (orientation {:?})",
        format,
        img.width(),
        img.height(),
        orientation
    );

    DecodedRaster::new(orientation.apply(img))
}

/// Pick a decoder from the content, falling back to the declared MIME type.
fn detect_format(bytes: &[u8], mime_type: &str) -> Option<ImageFormat> {
    image::guess_format(bytes)
        .ok()
        .or_else(|| ImageFormat::from_mime_type(mime_type.trim()))
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };

    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}
