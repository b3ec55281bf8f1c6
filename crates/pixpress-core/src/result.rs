//! Result assembly.

use std::sync::Arc;

use crate::config::OutputFormat;
use crate::encode::EncodedCandidate;
use crate::error::CompressError;
use crate::handle::{DisplayHandle, HandleRegistry};
use crate::plan::PlannedDimensions;

/// The caller-owned output of one pipeline run.
///
/// The caller must eventually release `display_handle` through the registry
/// that issued it.
#[derive(Debug, Clone)]
pub struct CompressionResult {
    /// Encoded output, shared with the display handle.
    pub encoded_bytes: Arc<[u8]>,
    pub width: u32,
    pub height: u32,
    pub byte_size: u64,
    /// `original_size / byte_size`.
    pub compression_ratio: f64,
    /// Quality of the pass that produced `encoded_bytes`.
    pub quality_used: f32,
    /// Encode passes spent (1 or 2).
    pub passes: u8,
    /// Still larger than the budget after the corrective pass. Not an error.
    pub exceeds_budget: bool,
    pub format: OutputFormat,
    pub display_handle: DisplayHandle,
}

impl CompressionResult {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Ratio rounded to two decimals, e.g. `"3.17"`.
    pub fn compression_ratio_label(&self) -> String {
        format!("{:.2}", self.compression_ratio)
    }
}

/// Render a byte count as mebibytes with two decimals, e.g. `"1.50 MB"`.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

/// Package the final candidate and register its display handle.
///
/// # Errors
///
/// `CompressError::DegenerateResult` when the candidate is empty; no handle
/// is acquired in that case.
pub fn assemble(
    candidate: EncodedCandidate,
    planned: PlannedDimensions,
    original_size: u64,
    max_output_bytes: u64,
    format: OutputFormat,
    registry: &HandleRegistry,
) -> Result<CompressionResult, CompressError> {
    if candidate.byte_size == 0 {
        return Err(CompressError::DegenerateResult);
    }

    let compression_ratio = original_size as f64 / candidate.byte_size as f64;
    let encoded_bytes: Arc<[u8]> = Arc::from(candidate.bytes);
    let display_handle = registry.acquire(Arc::clone(&encoded_bytes));

    Ok(CompressionResult {
        encoded_bytes,
        width: planned.width,
        height: planned.height,
        byte_size: candidate.byte_size,
        compression_ratio,
        quality_used: candidate.quality_used,
        passes: candidate.pass,
        exceeds_budget: candidate.byte_size > max_output_bytes,
        format,
        display_handle,
    })
}
