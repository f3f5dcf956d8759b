//! Core types for image decoding.

use image::ImageFormat;
use thiserror::Error;

use crate::grid::PixelGrid;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The source could not be read.
    #[error("I/O error: {0}")]
    IoError(String),

    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The decoded pixels cannot be represented as a pixel grid.
    #[error("Unsupported pixel layout: {0}")]
    UnsupportedLayout(String),
}

/// A decoded source image and the container format it came from.
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// Interleaved 8-bit samples.
    pub grid: PixelGrid,
    /// Format detected from the file contents.
    pub format: ImageFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::CorruptedFile("unexpected EOF".to_string());
        assert_eq!(
            err.to_string(),
            "Corrupted or incomplete image file: unexpected EOF"
        );

        let err = DecodeError::InvalidFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
    }
}
