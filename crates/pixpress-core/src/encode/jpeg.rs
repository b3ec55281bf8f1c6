//! JPEG encoding backend.
//!
//! This module provides JPEG encoding using the `image` crate's JPEG encoder.
//! Quality is expressed on the (0, 1] scale used throughout the pipeline and
//! mapped onto the codec's 1-100 scale.

use image::codecs::jpeg::JpegEncoder as ImageJpegEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use std::io::Cursor;
use thiserror::Error;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The codec backend failed to produce bytes
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// A lossy codec that turns an opaque RGB raster into bytes.
///
/// Implementations must be deterministic: the same raster and quality
/// always produce the same bytes.
pub trait RasterEncoder {
    /// Encode `raster` at `quality` in (0, 1].
    fn encode(&self, raster: &RgbImage, quality: f32) -> Result<Vec<u8>, EncodeError>;
}

/// Baseline JPEG via the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegEncoder;

impl RasterEncoder for JpegEncoder {
    fn encode(&self, raster: &RgbImage, quality: f32) -> Result<Vec<u8>, EncodeError> {
        encode_jpeg(raster.as_raw(), raster.width(), raster.height(), quality)
    }
}

/// Map a (0, 1] quality onto the JPEG 1-100 scale.
///
/// Out-of-range and non-finite values are clamped rather than rejected.
pub fn jpeg_quality_level(quality: f32) -> u8 {
    if !quality.is_finite() {
        return 1;
    }
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - Quality in (0, 1]; 0.8 matches the pipeline default
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: f32,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    let encoder = ImageJpegEncoder::new_with_quality(&mut buffer, jpeg_quality_level(quality));

    encoder
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
