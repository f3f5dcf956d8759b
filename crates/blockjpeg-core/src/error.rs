//! Error types for the block transform-quantization engine.

use thiserror::Error;

use crate::block::BlockPosition;

/// Errors raised by the in-memory compression engine.
///
/// Collaborator failures (decoding, encoding) have their own error types in
/// [`crate::decode`] and [`crate::encode`]; this enum only covers the pure
/// computation stages.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompressError {
    /// Quality is outside 1-100 or not a finite number.
    #[error("Invalid quality {value}: must be a number between 1 and 100")]
    InvalidQuality { value: f64 },

    /// A pixel grid was constructed with a zero-sized dimension.
    #[error("Invalid dimensions: height ({height}), width ({width}) and channels ({channels}) must be non-zero")]
    InvalidDimensions {
        height: usize,
        width: usize,
        channels: usize,
    },

    /// Pixel buffer length does not match height * width * channels.
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// A block arrived at reassembly out of raster order.
    #[error("Block order mismatch at index {index}: expected origin {expected}, found {found}")]
    BlockOrderMismatch {
        index: usize,
        expected: BlockPosition,
        found: BlockPosition,
    },

    /// The block arena does not describe the image being reassembled.
    #[error("Block geometry mismatch in {stage}: expected {expected}, found {found}")]
    BlockGeometryMismatch {
        stage: &'static str,
        expected: String,
        found: String,
    },
}
