//! Multi-quality batch runs.
//!
//! A batch is a loop of independent file compressions, one per configured
//! quality, followed by a size comparison against the source.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use super::{compress_file_with, default_output_path, PipelineError};
use crate::compress::Compressor;
use crate::config::CompressionConfig;
use crate::decode::DecodeError;
use crate::encode::EncodeError;

/// Outcome of compressing one source at one quality.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityResult {
    pub quality: f64,
    pub output_path: PathBuf,
    pub original_size: u64,
    pub compressed_size: u64,
    /// Space saved in percent, rounded to two decimals. Negative when the
    /// output is larger than the source.
    pub compression_ratio: f64,
}

/// Results of a whole batch, in configured quality order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub source: PathBuf,
    pub original_size: u64,
    pub needs_optimization: bool,
    pub results: Vec<QualityResult>,
}

/// Percentage of space saved, rounded to two decimals.
pub(crate) fn compression_ratio(original_size: u64, compressed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    let saved = (1.0 - compressed_size as f64 / original_size as f64) * 100.0;
    (saved * 100.0).round() / 100.0
}

fn file_size(path: &Path) -> Result<u64, PipelineError> {
    std::fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| PipelineError::IoError(format!("{}: {}", path.display(), e)))
}

/// Compress `source` at every quality in `config`.
///
/// All qualities are validated before any file is written. Outputs go to
/// `config.output_dir` (created if missing) or beside the source.
///
/// # Errors
///
/// Returns `PipelineError::Decode` if the source cannot be read, otherwise
/// stops at the first failing quality and returns its error.
pub fn compress_batch(
    source: &Path,
    config: &CompressionConfig,
) -> Result<BatchReport, PipelineError> {
    let qualities = config.validate()?;
    let original_size = std::fs::metadata(source)
        .map(|m| m.len())
        .map_err(|e| DecodeError::IoError(format!("{}: {}", source.display(), e)))?;

    if let Some(dir) = &config.output_dir {
        std::fs::create_dir_all(dir)
            .map_err(|e| EncodeError::IoError(format!("{}: {}", dir.display(), e)))?;
    }

    let mut results = Vec::with_capacity(qualities.len());
    for quality in qualities {
        let destination = default_output_path(source, quality, config.output_dir.as_deref())?;
        let compressor = Compressor::from_quality(quality).with_parallel(config.parallel);
        let written = compress_file_with(&compressor, source, Some(&destination))?;
        let compressed_size = file_size(&written)?;

        results.push(QualityResult {
            quality: quality.value(),
            output_path: written,
            original_size,
            compressed_size,
            compression_ratio: compression_ratio(original_size, compressed_size),
        });
    }

    info!(
        source = %source.display(),
        outputs = results.len(),
        original_size,
        "batch complete"
    );

    Ok(BatchReport {
        source: source.to_path_buf(),
        original_size,
        needs_optimization: original_size > config.size_threshold_bytes,
        results,
    })
}
