//! WASM-compatible wrapper types for pixel data.
//!
//! This module provides JavaScript-friendly types that wrap the core pixel
//! grid, handling the conversion between Rust and JavaScript data
//! representations.

use blockjpeg_core::{CompressError, PixelGrid};
use wasm_bindgen::prelude::*;

/// A pixel grid wrapper for JavaScript.
///
/// Samples are interleaved, row-major, `channels` bytes per pixel.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsPixelGrid {
    width: u32,
    height: u32,
    channels: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsPixelGrid {
    /// Create a new JsPixelGrid from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `channels` - Samples per pixel (1-4)
    /// * `pixels` - Interleaved pixel data, row-major
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, channels: u32, pixels: Vec<u8>) -> JsPixelGrid {
        JsPixelGrid {
            width,
            height,
            channels,
            pixels,
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of samples per pixel
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// Get the number of bytes in the pixel buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsPixelGrid {
    /// Wrap a core grid, taking ownership of its samples.
    pub(crate) fn from_grid(grid: PixelGrid) -> Self {
        Self {
            width: grid.width() as u32,
            height: grid.height() as u32,
            channels: grid.channels() as u32,
            pixels: grid.into_raw(),
        }
    }

    /// Validate and convert into a core grid.
    ///
    /// Note: This clones the pixel data.
    pub(crate) fn to_grid(&self) -> Result<PixelGrid, CompressError> {
        PixelGrid::new(
            self.height as usize,
            self.width as usize,
            self.channels as usize,
            self.pixels.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_pixel_grid_creation() {
        let img = JsPixelGrid::new(100, 50, 3, vec![0u8; 100 * 50 * 3]);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.channels(), 3);
        assert_eq!(img.byte_length(), 15000);
    }

    #[test]
    fn test_grid_round_trip() {
        let grid = PixelGrid::new(1, 2, 4, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        let js = JsPixelGrid::from_grid(grid.clone());
        assert_eq!(js.width(), 2);
        assert_eq!(js.height(), 1);
        assert_eq!(js.to_grid().unwrap(), grid);
    }

    #[test]
    fn test_to_grid_rejects_short_buffer() {
        let js = JsPixelGrid::new(4, 4, 3, vec![0u8; 10]);
        assert!(matches!(
            js.to_grid(),
            Err(CompressError::InvalidPixelData { .. })
        ));
    }
}
