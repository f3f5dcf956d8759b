//! Source size inspection.

use std::path::Path;

use serde::Serialize;

use super::PipelineError;

/// Size of a source file and whether it exceeds the optimization threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FileSizeReport {
    pub size_bytes: u64,
    pub needs_optimization: bool,
}

/// Report a file's size; anything strictly above `threshold_bytes` needs
/// optimization.
pub fn inspect_file(path: &Path, threshold_bytes: u64) -> Result<FileSizeReport, PipelineError> {
    let size_bytes = std::fs::metadata(path)
        .map_err(|e| PipelineError::IoError(format!("{}: {}", path.display(), e)))?
        .len();

    Ok(FileSizeReport {
        size_bytes,
        needs_optimization: size_bytes > threshold_bytes,
    })
}
