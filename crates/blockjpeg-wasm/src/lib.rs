//! Blockjpeg WASM - WebAssembly bindings for Blockjpeg
//!
//! This crate provides WASM bindings to expose the blockjpeg-core engine
//! to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for pixel data
//! - `compress` - Quantization tables and compression bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { compress_image } from '@blockjpeg/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const compressed = compress_image(bytes, 25);
//! console.log(`Compressed to ${compressed.byteLength} bytes`);
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod types;

// Re-export public types
pub use compress::{
    build_quantization_table, compress_grid, compress_image, compress_pixels,
    quantization_table_rows,
};
pub use types::JsPixelGrid;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
