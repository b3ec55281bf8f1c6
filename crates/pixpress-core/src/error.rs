//! Pipeline error taxonomy.
//!
//! Every error is scoped to the single image being processed.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;

/// Errors from one run of the compression pipeline.
#[derive(Debug, Error)]
pub enum CompressError {
    /// Input bytes could not be decoded.
    #[error("Decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// Source dimensions cannot be planned (zero width or height).
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The codec failed on either encode pass.
    #[error("Encode failed: {0}")]
    Encode(#[from] EncodeError),

    /// The encoder produced zero bytes.
    #[error("Encoder produced an empty output")]
    DegenerateResult,

    /// The compression target is unusable.
    #[error("Invalid compression target: {0}")]
    InvalidTarget(String),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, CompressError>;
