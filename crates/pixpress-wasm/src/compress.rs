//! Compression WASM bindings.
//!
//! # Functions
//!
//! - [`compress_image`] - Run the full pipeline on one file
//! - [`release_display_handle`] - Release a result's display handle
//! - [`live_display_handles`] - Count handles not yet released
//! - [`default_target`] - The default compression target as a JS object
//!
//! # Example
//!
//! ```typescript
//! import { compress_image, release_display_handle } from '@pixpress/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = compress_image(bytes, file.type, file.size, { maxOutputBytes: 512 * 1024 });
//! const url = URL.createObjectURL(new Blob([result.bytes()], { type: result.mime_type }));
//! // ...later, when the preview is removed
//! release_display_handle(result.handle_id);
//! ```

use crate::types::JsCompressionResult;
use pixpress_core::{CompressionTarget, DisplayHandle, HandleRegistry, ReleaseOutcome, SourceImage};
use wasm_bindgen::prelude::*;

/// Parse an optional JS target object, falling back to defaults.
pub(crate) fn parse_target(target: JsValue) -> Result<CompressionTarget, JsValue> {
    if target.is_undefined() || target.is_null() {
        return Ok(CompressionTarget::default());
    }
    serde_wasm_bindgen::from_value(target)
        .map_err(|e| JsValue::from_str(&format!("Invalid compression target: {}", e)))
}

/// Compress one image file.
///
/// # Arguments
///
/// * `bytes` - The raw file bytes as a `Uint8Array`
/// * `mime_type` - The file's declared MIME type (must be `image/*`)
/// * `original_size` - The file's size in bytes, used for the ratio
/// * `target` - `undefined`, `null`, or `{ maxDimensionPx?, maxOutputBytes?, initialQuality? }`
///
/// # Errors
///
/// Returns an error string if the MIME type is not an image type, the target
/// is invalid, or any pipeline stage fails.
#[wasm_bindgen]
pub fn compress_image(
    bytes: Vec<u8>,
    mime_type: &str,
    original_size: f64,
    target: JsValue,
) -> Result<JsCompressionResult, JsValue> {
    let target = parse_target(target)?;
    let source = SourceImage::new(bytes, mime_type, original_size.max(0.0) as u64);
    if !source.has_image_mime_type() {
        return Err(JsValue::from_str(&format!(
            "Not an image file: {}",
            source.mime_type()
        )));
    }

    pixpress_core::compress(&source, &target)
        .map(JsCompressionResult::from_result)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Release a display handle by id.
///
/// Returns `true` if the handle was live, `false` if it had already been
/// released (a caller bug, also reported on the console).
#[wasm_bindgen]
pub fn release_display_handle(handle_id: f64) -> bool {
    let handle = DisplayHandle::from_id(handle_id as u64);
    match HandleRegistry::global().release(&handle) {
        ReleaseOutcome::Released => true,
        ReleaseOutcome::AlreadyReleased => {
            #[cfg(target_arch = "wasm32")]
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "{} was already released",
                handle
            )));
            false
        }
    }
}

/// Number of display handles acquired but not yet released.
#[wasm_bindgen]
pub fn live_display_handles() -> usize {
    HandleRegistry::global().live_count()
}

/// The default compression target as a plain JS object.
#[wasm_bindgen]
pub fn default_target() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&CompressionTarget::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
