//! File-level compression orchestration.
//!
//! A run validates the quality, decodes the source, pushes the grid through
//! the block engine, and encodes the result with the same quality as the
//! encoder setting. The pixels are therefore degraded twice: once by the
//! block quantization and again by the output encoder. Callers wanting only
//! the pixel-domain effect can use [`Compressor::compress`] directly and
//! encode losslessly.
//!
//! # Output naming
//!
//! Without an explicit destination, `photo.jpg` compressed at quality 25 is
//! written next to the source as `photo_compressed_q25.jpg`.

mod batch;
mod inspect;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::compress::Compressor;
use crate::decode::{decode_bytes, decode_file, DecodeError};
use crate::encode::{encode_to_bytes, encode_to_path, EncodeError};
use crate::error::CompressError;
use crate::quality::Quality;

pub use batch::{compress_batch, BatchReport, QualityResult};
pub use inspect::{inspect_file, FileSizeReport};

/// Errors from a file-level run. Collaborator errors pass through unchanged.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Compress(#[from] CompressError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The source path has no file name to derive an output name from.
    #[error("Invalid source path: {0}")]
    InvalidSourcePath(PathBuf),

    /// File metadata could not be read.
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Output path for `source` at `quality`: `<stem>_compressed_q<quality><ext>`.
///
/// The file lands in `output_dir` when given, otherwise beside the source.
pub fn default_output_path(
    source: &Path,
    quality: Quality,
    output_dir: Option<&Path>,
) -> Result<PathBuf, PipelineError> {
    let stem = source
        .file_stem()
        .ok_or_else(|| PipelineError::InvalidSourcePath(source.to_path_buf()))?
        .to_string_lossy();
    let ext = source
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let file_name = format!("{stem}_compressed_q{quality}{ext}");
    let dir = output_dir.or_else(|| source.parent()).unwrap_or(Path::new(""));
    Ok(dir.join(file_name))
}

/// Compress one file with an existing compressor.
pub fn compress_file_with(
    compressor: &Compressor,
    source: &Path,
    destination: Option<&Path>,
) -> Result<PathBuf, PipelineError> {
    let quality = compressor.quality();
    let destination = match destination {
        Some(path) => path.to_path_buf(),
        None => default_output_path(source, quality, None)?,
    };

    let decoded = decode_file(source)?;
    let reconstructed = compressor.compress(decoded.grid)?;
    let written = encode_to_path(&reconstructed, quality.encoder_hint(), &destination)?;

    info!(
        source = %source.display(),
        destination = %written.display(),
        quality = quality.value(),
        "compressed image"
    );

    Ok(written)
}

/// Compress `source` at `quality` and write the result.
///
/// Returns the path written. Quality is validated before the source is
/// touched.
///
/// # Errors
///
/// - `PipelineError::Compress` with `InvalidQuality` for a bad quality
/// - `PipelineError::Decode` if the source cannot be read or decoded
/// - `PipelineError::Encode` if the destination cannot be written
pub fn compress_file(
    source: &Path,
    destination: Option<&Path>,
    quality: f64,
) -> Result<PathBuf, PipelineError> {
    let compressor = Compressor::new(quality)?;
    compress_file_with(&compressor, source, destination)
}

/// Compress an in-memory image file, re-encoding in its original format.
pub fn compress_bytes(bytes: &[u8], quality: f64) -> Result<Vec<u8>, PipelineError> {
    let compressor = Compressor::new(quality)?;
    let decoded = decode_bytes(bytes)?;
    let format = decoded.format;
    let reconstructed = compressor.compress(decoded.grid)?;
    Ok(encode_to_bytes(
        &reconstructed,
        format,
        compressor.quality().encoder_hint(),
    )?)
}
