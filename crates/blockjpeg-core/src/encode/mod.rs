//! Image encoding for the compression pipeline.
//!
//! This module provides functionality for:
//! - Encoding reconstructed grids to JPEG with a quality setting
//! - Encoding to lossless formats (PNG, BMP, ...) chosen by file extension
//!
//! # Examples
//!
//! ```ignore
//! use blockjpeg_core::encode::encode_to_path;
//!
//! encode_to_path(&grid, 75, Path::new("photo_compressed_q75.jpg")).unwrap();
//! ```

mod writer;

pub use writer::{encode_to_bytes, encode_to_path, format_for_path, EncodeError};
