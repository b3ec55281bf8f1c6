//! Compression target configuration.

use serde::{Deserialize, Serialize};

use crate::error::CompressError;

/// Default cap for the longest output edge, in pixels.
pub const DEFAULT_MAX_DIMENSION_PX: u32 = 1920;

/// Default output budget: 1 MiB.
pub const DEFAULT_MAX_OUTPUT_BYTES: u64 = 1024 * 1024;

/// Default quality for the first encode pass.
pub const DEFAULT_INITIAL_QUALITY: f32 = 0.8;

/// Output container. Only one lossy format is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Jpeg,
}

impl OutputFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
        }
    }
}

/// What a compression run aims for.
///
/// Deserializes from camelCase JSON with every field optional:
///
/// ```json
/// { "maxDimensionPx": 1920, "maxOutputBytes": 1048576, "initialQuality": 0.8, "format": "jpeg" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompressionTarget {
    /// Longest allowed output edge in pixels. Images are never upscaled.
    pub max_dimension_px: u32,
    /// Byte budget for the encoded output (best effort).
    pub max_output_bytes: u64,
    /// Quality of the first pass, in (0, 1].
    pub initial_quality: f32,
    /// Output container.
    pub format: OutputFormat,
}

impl Default for CompressionTarget {
    fn default() -> Self {
        Self {
            max_dimension_px: DEFAULT_MAX_DIMENSION_PX,
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
            initial_quality: DEFAULT_INITIAL_QUALITY,
            format: OutputFormat::Jpeg,
        }
    }
}

impl CompressionTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_dimension(mut self, px: u32) -> Self {
        self.max_dimension_px = px;
        self
    }

    pub fn with_max_output_bytes(mut self, bytes: u64) -> Self {
        self.max_output_bytes = bytes;
        self
    }

    /// Set the budget in mebibytes (`mb * 1024 * 1024`, rounded down).
    pub fn with_max_size_mb(mut self, mb: f64) -> Self {
        self.max_output_bytes = (mb * 1024.0 * 1024.0).max(0.0) as u64;
        self
    }

    pub fn with_initial_quality(mut self, quality: f32) -> Self {
        self.initial_quality = quality;
        self
    }

    /// Check the target before any image is touched.
    pub fn validate(&self) -> Result<(), CompressError> {
        if self.max_dimension_px == 0 {
            return Err(CompressError::InvalidTarget(
                "maxDimensionPx must be greater than zero".to_string(),
            ));
        }
        if self.max_output_bytes == 0 {
            return Err(CompressError::InvalidTarget(
                "maxOutputBytes must be greater than zero".to_string(),
            ));
        }
        if !self.initial_quality.is_finite()
            || self.initial_quality <= 0.0
            || self.initial_quality > 1.0
        {
            return Err(CompressError::InvalidTarget(format!(
                "initialQuality must be in (0, 1], got {}",
                self.initial_quality
            )));
        }
        Ok(())
    }
}
