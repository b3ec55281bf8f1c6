//! Budget-aware encoding for the compression pipeline.
//!
//! This module provides:
//! - Raster preparation (alpha flattening onto white, Lanczos3 resampling)
//! - The [`RasterEncoder`] seam and its JPEG implementation
//! - The two-pass size-targeting loop, [`encode_within_budget`]
//!
//! # Architecture
//!
//! Encoding is synchronous and single-threaded per image. Callers that want
//! parallelism run several images at once; nothing here is shared between
//! images.

mod budget;
mod jpeg;
mod prepare;

pub use budget::{corrective_quality, encode_within_budget, EncodedCandidate, MAX_PASSES};
pub use jpeg::{encode_jpeg, jpeg_quality_level, EncodeError, JpegEncoder, RasterEncoder};
pub use prepare::{flatten_alpha, prepare_raster, BACKGROUND_WHITE};
