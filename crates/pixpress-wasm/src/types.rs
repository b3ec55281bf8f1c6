//! WASM-compatible wrapper types for compression output.
//!
//! This module provides JavaScript-friendly types that wrap the core Pixpress
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use js_sys::Uint8Array;
use pixpress_core::{format_megabytes, CompressionResult};
use wasm_bindgen::prelude::*;

/// A compression result wrapper for JavaScript.
///
/// # Memory Management
///
/// The encoded bytes live in WASM memory and are shared with the display
/// handle registry. `bytes()` copies them into a JavaScript `Uint8Array`.
///
/// Dropping this object does NOT release the display handle. Call
/// `release_display_handle(result.handle_id)` once the preview is gone.
#[wasm_bindgen]
pub struct JsCompressionResult {
    inner: CompressionResult,
}

#[wasm_bindgen]
impl JsCompressionResult {
    /// Output width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Output height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Encoded size in bytes
    #[wasm_bindgen(getter)]
    pub fn byte_size(&self) -> f64 {
        self.inner.byte_size as f64
    }

    /// Original size divided by encoded size
    #[wasm_bindgen(getter)]
    pub fn compression_ratio(&self) -> f64 {
        self.inner.compression_ratio
    }

    /// Compression ratio with two decimals, e.g. "3.17"
    #[wasm_bindgen(getter)]
    pub fn compression_ratio_label(&self) -> String {
        self.inner.compression_ratio_label()
    }

    /// Quality (0-1] of the pass that produced the bytes
    #[wasm_bindgen(getter)]
    pub fn quality_used(&self) -> f32 {
        self.inner.quality_used
    }

    /// Number of encode passes spent (1 or 2)
    #[wasm_bindgen(getter)]
    pub fn passes(&self) -> u8 {
        self.inner.passes
    }

    /// True when the output is still larger than the byte budget
    #[wasm_bindgen(getter)]
    pub fn exceeds_budget(&self) -> bool {
        self.inner.exceeds_budget
    }

    /// MIME type of the encoded bytes
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.inner.mime_type().to_string()
    }

    /// Encoded size for display, e.g. "1.50 MB"
    #[wasm_bindgen(getter)]
    pub fn size_label(&self) -> String {
        format_megabytes(self.inner.byte_size)
    }

    /// File extension for the output format, e.g. "jpg"
    #[wasm_bindgen(getter)]
    pub fn extension(&self) -> String {
        self.inner.format.extension().to_string()
    }

    /// Display handle as a string key, e.g. "pixpress:display/3"
    #[wasm_bindgen(getter)]
    pub fn display_handle(&self) -> String {
        self.inner.display_handle.to_string()
    }

    /// Numeric handle id, for `release_display_handle`
    #[wasm_bindgen(getter)]
    pub fn handle_id(&self) -> f64 {
        self.inner.display_handle.id() as f64
    }

    /// Returns the encoded bytes as a Uint8Array (copied).
    pub fn bytes(&self) -> Uint8Array {
        Uint8Array::from(&self.inner.encoded_bytes[..])
    }
}

impl JsCompressionResult {
    pub(crate) fn from_result(inner: CompressionResult) -> Self {
        Self { inner }
    }

    #[cfg(test)]
    pub(crate) fn inner(&self) -> &CompressionResult {
        &self.inner
    }
}
