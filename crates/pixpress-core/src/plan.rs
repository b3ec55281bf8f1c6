//! Output dimension planning.

use crate::error::CompressError;

/// Output size for one image, both sides non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedDimensions {
    pub width: u32,
    pub height: u32,
}

/// Fit `width`x`height` inside a `max_dimension_px` square, keeping the
/// aspect ratio and never upscaling.
///
/// `ratio = min(max / width, max / height, 1.0)`, each side rounded to the
/// nearest pixel and kept at least 1 pixel for extreme aspect ratios.
///
/// # Errors
///
/// `CompressError::InvalidDimensions` if either side is zero, and
/// `CompressError::InvalidTarget` if `max_dimension_px` is zero.
pub fn plan_dimensions(
    width: u32,
    height: u32,
    max_dimension_px: u32,
) -> Result<PlannedDimensions, CompressError> {
    if width == 0 || height == 0 {
        return Err(CompressError::InvalidDimensions { width, height });
    }
    if max_dimension_px == 0 {
        return Err(CompressError::InvalidTarget(
            "maxDimensionPx must be greater than zero".to_string(),
        ));
    }

    let max = max_dimension_px as f64;
    let ratio = (max / width as f64).min(max / height as f64).min(1.0);

    Ok(PlannedDimensions {
        width: scale_side(width, ratio),
        height: scale_side(height, ratio),
    })
}

fn scale_side(side: u32, ratio: f64) -> u32 {
    ((side as f64 * ratio).round() as u32).max(1)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
