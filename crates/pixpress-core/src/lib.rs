//! Pixpress Core - Budget-aware image compression
//!
//! This crate takes a user-supplied raster image and produces a resized JPEG
//! that fits under a byte budget while keeping the aspect ratio:
//!
//! 1. [`decode`] turns bytes into an upright raster
//! 2. [`plan`] caps the longest edge without upscaling
//! 3. [`encode`] flattens alpha, resamples, and runs at most two encode passes
//! 4. [`result`] packages bytes, dimensions, size and compression ratio
//! 5. [`handle`] issues the caller-released display handle
//!
//! [`compress`] runs the whole pipeline for one image and
//! [`compress_batch`] runs it for many, returning per-image outcomes in
//! submission order.

pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod handle;
pub mod pipeline;
pub mod plan;
pub mod result;
pub mod source;

#[cfg(test)]
mod test_support;

pub use config::{CompressionTarget, OutputFormat};
pub use decode::{DecodeError, DecodedRaster};
pub use encode::{EncodeError, EncodedCandidate, JpegEncoder, RasterEncoder};
pub use error::{CompressError, Result};
pub use handle::{DisplayHandle, HandleRegistry, ReleaseOutcome};
pub use pipeline::{compress, compress_batch, compress_batch_with, compress_with};
pub use plan::{plan_dimensions, PlannedDimensions};
pub use result::{format_megabytes, CompressionResult};
pub use source::SourceImage;

/// Release a display handle issued by [`compress`] or [`compress_batch`].
pub fn release_display_handle(handle: &DisplayHandle) -> ReleaseOutcome {
    HandleRegistry::global().release(handle)
}
