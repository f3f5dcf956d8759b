//! Compression WASM bindings.
//!
//! This module exposes the blockjpeg-core engine to JavaScript so the
//! browser can preview a quality level before anything is uploaded.
//!
//! # Functions
//!
//! - [`build_quantization_table`] - The 64 table divisors for a quality
//! - [`quantization_table_rows`] - The same table as an 8x8 JS array
//! - [`compress_pixels`] - Run the engine over raw interleaved pixels
//! - [`compress_grid`] - Run the engine over a `JsPixelGrid`
//! - [`compress_image`] - Decode, compress and re-encode an image file
//!
//! # Example
//!
//! ```typescript
//! import { compress_image } from '@blockjpeg/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const preview = compress_image(bytes, 50);
//! const url = URL.createObjectURL(new Blob([preview], { type: file.type }));
//! ```

use blockjpeg_core::{CompressError, Compressor, PixelGrid, QuantizationTable};
use wasm_bindgen::prelude::*;

use crate::types::JsPixelGrid;

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn table_for(quality: f64) -> Result<QuantizationTable, CompressError> {
    blockjpeg_core::build_quantization_table(quality)
}

fn compress_raw(
    pixels: &[u8],
    width: u32,
    height: u32,
    channels: u32,
    quality: f64,
) -> Result<Vec<u8>, CompressError> {
    // Quality first, before the pixel buffer is copied
    let compressor = Compressor::new(quality)?;
    let grid = PixelGrid::new(
        height as usize,
        width as usize,
        channels as usize,
        pixels.to_vec(),
    )?;
    Ok(compressor.compress(grid)?.into_raw())
}

/// Quantization table for `quality`, 64 divisors in row-major order.
///
/// # Errors
///
/// Returns an error if quality is outside 1-100.
#[wasm_bindgen]
pub fn build_quantization_table(quality: f64) -> Result<Vec<u16>, JsValue> {
    table_for(quality)
        .map(|table| table.values().to_vec())
        .map_err(to_js_error)
}

/// Quantization table for `quality` as an array of eight 8-element rows.
#[wasm_bindgen]
pub fn quantization_table_rows(quality: f64) -> Result<JsValue, JsValue> {
    let table = table_for(quality).map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&table.rows()).map_err(to_js_error)
}

/// Compress raw interleaved pixels and return pixels of the same shape.
///
/// # Arguments
///
/// * `pixels` - Interleaved samples as a `Uint8Array`, row-major
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `channels` - Samples per pixel
/// * `quality` - Compression quality (1-100)
///
/// # Errors
///
/// Returns an error if quality is invalid, a dimension is zero, or the
/// buffer length does not match `width * height * channels`.
#[wasm_bindgen]
pub fn compress_pixels(
    pixels: &[u8],
    width: u32,
    height: u32,
    channels: u32,
    quality: f64,
) -> Result<Vec<u8>, JsValue> {
    compress_raw(pixels, width, height, channels, quality).map_err(to_js_error)
}

/// Compress a `JsPixelGrid`, returning a new grid.
#[wasm_bindgen]
pub fn compress_grid(grid: &JsPixelGrid, quality: f64) -> Result<JsPixelGrid, JsValue> {
    let compressor = Compressor::new(quality).map_err(to_js_error)?;
    let grid = grid.to_grid().map_err(to_js_error)?;
    compressor
        .compress(grid)
        .map(JsPixelGrid::from_grid)
        .map_err(to_js_error)
}

/// Decode an image file, compress it, and re-encode it in its own format.
///
/// JPEG output is encoded with `quality` as its encoder setting as well.
#[wasm_bindgen]
pub fn compress_image(bytes: &[u8], quality: f64) -> Result<Vec<u8>, JsValue> {
    blockjpeg_core::compress_bytes(bytes, quality).map_err(to_js_error)
}


/// WASM-specific tests that require JsValue.
///
/// These tests use functions that return `Result<T, JsValue>` and can only
/// run on wasm32 targets. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_build_quantization_table() {
        let table = build_quantization_table(50.0).unwrap();
        assert_eq!(table.len(), 64);
        assert_eq!(table[0], 8);
    }

    #[wasm_bindgen_test]
    fn test_build_quantization_table_invalid() {
        assert!(build_quantization_table(0.0).is_err());
    }

    #[wasm_bindgen_test]
    fn test_compress_pixels() {
        let pixels = vec![128u8; 16 * 16 * 3];
        let out = compress_pixels(&pixels, 16, 16, 3, 75.0).unwrap();
        assert_eq!(out, pixels);
    }

    #[wasm_bindgen_test]
    fn test_compress_grid() {
        let grid = JsPixelGrid::new(9, 9, 1, vec![200u8; 81]);
        let out = compress_grid(&grid, 100.0).unwrap();
        assert_eq!(out.width(), 9);
        assert_eq!(out.height(), 9);
    }
}
