//! Pixpress WASM - WebAssembly bindings for Pixpress
//!
//! This crate exposes the pixpress-core compression pipeline to
//! JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `compress` - Compression entry point and display handle lifecycle
//! - `types` - WASM-compatible wrapper for compression results
//!
//! # Usage
//!
//! ```typescript
//! import init, { compress_image, release_display_handle } from '@pixpress/wasm';
//!
//! await init();
//!
//! const files = [...input.files].filter((f) => f.type.startsWith('image/'));
//! for (const file of files) {
//!   const bytes = new Uint8Array(await file.arrayBuffer());
//!   try {
//!     const result = compress_image(bytes, file.type, file.size, undefined);
//!     console.log(`${result.width}x${result.height}, ${result.compression_ratio_label}x`);
//!   } catch (err) {
//!     console.error(`${file.name}: ${err}`);
//!   }
//! }
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod types;

pub use compress::{compress_image, default_target, live_display_handles, release_display_handle};
pub use types::JsCompressionResult;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
