//! Raster preparation ahead of encoding: alpha flattening and resampling.

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage, Rgba};

use crate::decode::DecodedRaster;
use crate::plan::PlannedDimensions;

/// Background used where the source is transparent. The output format has
/// no alpha channel.
pub const BACKGROUND_WHITE: [u8; 3] = [255, 255, 255];

/// Produce the opaque RGB raster that gets encoded.
///
/// Alpha sources are composited over white first, then the result is
/// resampled to `planned` with Lanczos3. Resampling is skipped when the
/// size already matches.
pub fn prepare_raster(raster: &DecodedRaster, planned: PlannedDimensions) -> RgbImage {
    let opaque = if raster.has_alpha() {
        flatten_alpha(raster.image(), BACKGROUND_WHITE)
    } else {
        raster.image().to_rgb8()
    };

    if opaque.dimensions() == (planned.width, planned.height) {
        return opaque;
    }

    imageops::resize(&opaque, planned.width, planned.height, FilterType::Lanczos3)
}

/// Composite an image over a solid background color.
pub fn flatten_alpha(img: &DynamicImage, background: [u8; 3]) -> RgbImage {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    RgbImage::from_fn(width, height, |x, y| {
        let Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
        let alpha = a as f32 / 255.0;
        let blend = |channel: u8, bg: u8| -> u8 {
            (channel as f32 * alpha + bg as f32 * (1.0 - alpha)).round() as u8
        };
        Rgb([
            blend(r, background[0]),
            blend(g, background[1]),
            blend(b, background[2]),
        ])
    })
}
