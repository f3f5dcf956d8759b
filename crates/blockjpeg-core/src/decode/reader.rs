//! Image decoding into pixel grids.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageReader};
use tracing::debug;

use super::{DecodeError, SourceImage};
use crate::grid::PixelGrid;

/// Decode an image from bytes.
///
/// The container format is detected from the contents. Channel layout is
/// kept: grayscale stays one channel, RGBA stays four. Deeper sample types
/// (16-bit, float) are reduced to 8 bits.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be detected and
/// `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_bytes(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let format = reader.format().ok_or(DecodeError::InvalidFormat)?;

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let grid = grid_from_dynamic(img)?;
    debug!(
        ?format,
        height = grid.height(),
        width = grid.width(),
        channels = grid.channels(),
        "decoded image"
    );

    Ok(SourceImage { grid, format })
}

/// Read and decode an image file.
///
/// # Errors
///
/// Returns `DecodeError::IoError` if the file cannot be read, otherwise the
/// errors of [`decode_bytes`].
pub fn decode_file(path: &Path) -> Result<SourceImage, DecodeError> {
    let bytes = std::fs::read(path)
        .map_err(|e| DecodeError::IoError(format!("{}: {}", path.display(), e)))?;
    decode_bytes(&bytes)
}

/// Convert a decoded image into an interleaved 8-bit grid.
pub(crate) fn grid_from_dynamic(img: DynamicImage) -> Result<PixelGrid, DecodeError> {
    let (channels, (width, height), raw) = match img {
        DynamicImage::ImageLuma8(buf) => (1, buf.dimensions(), buf.into_raw()),
        DynamicImage::ImageLumaA8(buf) => (2, buf.dimensions(), buf.into_raw()),
        DynamicImage::ImageRgb8(buf) => (3, buf.dimensions(), buf.into_raw()),
        DynamicImage::ImageRgba8(buf) => (4, buf.dimensions(), buf.into_raw()),
        other => {
            let color = other.color();
            match (color.has_color(), color.has_alpha()) {
                (false, false) => {
                    let buf = other.into_luma8();
                    (1, buf.dimensions(), buf.into_raw())
                }
                (false, true) => {
                    let buf = other.into_luma_alpha8();
                    (2, buf.dimensions(), buf.into_raw())
                }
                (true, false) => {
                    let buf = other.into_rgb8();
                    (3, buf.dimensions(), buf.into_raw())
                }
                (true, true) => {
                    let buf = other.into_rgba8();
                    (4, buf.dimensions(), buf.into_raw())
                }
            }
        }
    };

    PixelGrid::new(height as usize, width as usize, channels, raw)
        .map_err(|e| DecodeError::UnsupportedLayout(e.to_string()))
}
