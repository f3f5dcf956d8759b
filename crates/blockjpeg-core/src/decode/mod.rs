//! Image decoding for the compression pipeline.
//!
//! This module provides functionality for:
//! - Detecting the container format of a source image
//! - Decoding it into an interleaved 8-bit [`PixelGrid`](crate::grid::PixelGrid)
//!
//! # Architecture
//!
//! Decoding sits outside the engine proper: the orchestrator calls it once
//! per run to obtain the grid it hands to the block pipeline. Failures are
//! reported as [`DecodeError`] and surfaced to the caller unchanged.
//!
//! # Examples
//!
//! ```ignore
//! use blockjpeg_core::decode::decode_file;
//!
//! let source = decode_file(Path::new("photo.jpg")).unwrap();
//! println!("Decoded {}x{} image", source.grid.width(), source.grid.height());
//! ```

mod reader;
mod types;

pub use reader::{decode_bytes, decode_file};
pub use types::{DecodeError, SourceImage};
