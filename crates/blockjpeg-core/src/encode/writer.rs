//! Image encoding for reconstructed grids.
//!
//! JPEG output goes through the `image` crate's JPEG encoder with the run's
//! quality as its setting, so the encoder degrades the already-quantized
//! pixels a second time. Lossless formats ignore the quality hint.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat};
use thiserror::Error;
use tracing::debug;

use crate::grid::PixelGrid;

/// Errors that can occur during image encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Grid dimensions do not fit the encoder's size limits
    #[error("Invalid dimensions: {height}x{width} cannot be encoded")]
    InvalidDimensions { height: usize, width: usize },

    /// Channel count has no matching color type
    #[error("Unsupported channel count: {0}")]
    UnsupportedChannels(usize),

    /// Destination extension is not a known image format
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// The encoder rejected the image
    #[error("Image encoding failed: {0}")]
    EncodingFailed(String),

    /// Writing the destination failed
    #[error("I/O error: {0}")]
    IoError(String),
}

fn color_type(channels: usize) -> Result<ExtendedColorType, EncodeError> {
    match channels {
        1 => Ok(ExtendedColorType::L8),
        2 => Ok(ExtendedColorType::La8),
        3 => Ok(ExtendedColorType::Rgb8),
        4 => Ok(ExtendedColorType::Rgba8),
        other => Err(EncodeError::UnsupportedChannels(other)),
    }
}

/// Pick the output format from a destination path's extension.
///
/// # Errors
///
/// Returns `EncodeError::UnsupportedFormat` for a missing or unknown
/// extension.
pub fn format_for_path(path: &Path) -> Result<ImageFormat, EncodeError> {
    ImageFormat::from_path(path)
        .map_err(|_| EncodeError::UnsupportedFormat(path.display().to_string()))
}

/// Encode a grid into an in-memory image file.
///
/// # Arguments
///
/// * `grid` - Pixels to encode (1, 2, 3 or 4 channels)
/// * `format` - Output container format
/// * `quality` - Encoder quality (1-100), applied by JPEG only
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 60-90: Medium quality, acceptable for web
/// * Below 60: Low quality, visible artifacts
///
/// # Errors
///
/// Returns `EncodeError::UnsupportedChannels` for more than four channels
/// and `EncodeError::EncodingFailed` if the encoder rejects the grid.
pub fn encode_to_bytes(
    grid: &PixelGrid,
    format: ImageFormat,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = match (u32::try_from(grid.width()), u32::try_from(grid.height())) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(EncodeError::InvalidDimensions {
                height: grid.height(),
                width: grid.width(),
            })
        }
    };
    let color = color_type(grid.channels())?;

    // Clamp quality to valid range (1-100)
    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());

    if format == ImageFormat::Jpeg {
        JpegEncoder::new_with_quality(&mut buffer, quality)
            .write_image(grid.as_raw(), width, height, color)
            .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    } else {
        image::write_buffer_with_format(&mut buffer, grid.as_raw(), width, height, color, format)
            .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    }

    Ok(buffer.into_inner())
}

/// Encode a grid and write it to `destination`.
///
/// The format follows the destination's extension. Returns the path that
/// was written.
pub fn encode_to_path(
    grid: &PixelGrid,
    quality: u8,
    destination: &Path,
) -> Result<PathBuf, EncodeError> {
    let format = format_for_path(destination)?;
    let bytes = encode_to_bytes(grid, format, quality)?;

    std::fs::write(destination, &bytes)
        .map_err(|e| EncodeError::IoError(format!("{}: {}", destination.display(), e)))?;

    debug!(
        destination = %destination.display(),
        ?format,
        quality,
        bytes = bytes.len(),
        "wrote encoded image"
    );

    Ok(destination.to_path_buf())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
