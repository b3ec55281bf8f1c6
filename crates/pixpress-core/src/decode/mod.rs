//! Raster decoding for the compression pipeline.
//!
//! Turns caller-supplied bytes into an upright [`DecodedRaster`]. Supported
//! containers are whatever the `image` crate is built with (JPEG, PNG, GIF,
//! WebP, BMP); animated inputs decode to their first frame.
//!
//! Decode failures are terminal for the one image being processed. Nothing
//! is retried and no state outlives the call.

mod raster;
mod types;

pub use raster::{decode_source, get_orientation};
pub use types::{DecodeError, DecodedRaster, Orientation};
