//! Two-pass, budget-aware encoding.
//!
//! Pass 1 encodes at the initial quality. If that overshoots the byte
//! budget, a second quality is estimated proportionally from the overshoot
//! (`budget / size * quality`, capped at the initial quality) and pass 2 is
//! returned whatever its size. There is never a third pass.

use image::RgbImage;

use super::{EncodeError, RasterEncoder};
use crate::config::CompressionTarget;

/// Maximum encode passes for one image.
pub const MAX_PASSES: u8 = 2;

/// Encoder output for a single pass.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedCandidate {
    pub bytes: Vec<u8>,
    pub byte_size: u64,
    pub quality_used: f32,
    /// 1 for the first pass, 2 for the corrective pass.
    pub pass: u8,
}

impl EncodedCandidate {
    fn new(bytes: Vec<u8>, quality_used: f32, pass: u8) -> Self {
        let byte_size = bytes.len() as u64;
        Self {
            bytes,
            byte_size,
            quality_used,
            pass,
        }
    }

    pub fn fits(&self, max_output_bytes: u64) -> bool {
        self.byte_size <= max_output_bytes
    }
}

/// Quality for the corrective pass.
///
/// `min(max_output_bytes / first_size * first_quality, initial_quality)`.
pub fn corrective_quality(
    max_output_bytes: u64,
    first_size: u64,
    first_quality: f32,
    initial_quality: f32,
) -> f32 {
    if first_size == 0 {
        return initial_quality;
    }
    let scaled = (max_output_bytes as f64 / first_size as f64 * first_quality as f64) as f32;
    scaled.min(initial_quality)
}

/// Encode `raster` so it best-effort fits `target.max_output_bytes`.
///
/// # Errors
///
/// Returns the encoder's error from whichever pass failed.
pub fn encode_within_budget<E: RasterEncoder + ?Sized>(
    encoder: &E,
    raster: &RgbImage,
    target: &CompressionTarget,
) -> Result<EncodedCandidate, EncodeError> {
    let first_quality = target.initial_quality;
    let first = EncodedCandidate::new(encoder.encode(raster, first_quality)?, first_quality, 1);

    log::debug!(
        "pass 1: {} bytes at quality {:.3} (budget {})",
        first.byte_size,
        first_quality,
        target.max_output_bytes
    );

    if first.fits(target.max_output_bytes) {
        return Ok(first);
    }

    let second_quality = corrective_quality(
        target.max_output_bytes,
        first.byte_size,
        first_quality,
        target.initial_quality,
    );
    drop(first);

    let second = EncodedCandidate::new(encoder.encode(raster, second_quality)?, second_quality, 2);

    log::debug!(
        "pass 2: {} bytes at quality {:.3}",
        second.byte_size,
        second_quality
    );

    if !second.fits(target.max_output_bytes) {
        log::warn!(
            "output still over budget after {} passes: {} > {} bytes",
            MAX_PASSES,
            second.byte_size,
            target.max_output_bytes
        );
    }

    Ok(second)
}
