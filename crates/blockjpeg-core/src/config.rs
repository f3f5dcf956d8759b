//! Batch compression settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::CompressError;
use crate::quality::Quality;

/// Qualities produced by a batch run when none are configured.
pub const DEFAULT_QUALITIES: [f64; 3] = [25.0, 50.0, 75.0];

/// Files larger than this are flagged as needing optimization (2 MiB).
pub const DEFAULT_SIZE_THRESHOLD_BYTES: u64 = 2 * 1024 * 1024;

/// Settings for file-level and batch compression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    /// Quality levels written by a batch run, in order.
    pub qualities: Vec<f64>,
    /// Directory for batch outputs. Defaults to the source's directory.
    pub output_dir: Option<PathBuf>,
    /// Process blocks on the rayon pool when available.
    pub parallel: bool,
    /// Size above which a source is reported as needing optimization.
    pub size_threshold_bytes: u64,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            qualities: DEFAULT_QUALITIES.to_vec(),
            output_dir: None,
            parallel: cfg!(feature = "parallel"),
            size_threshold_bytes: DEFAULT_SIZE_THRESHOLD_BYTES,
        }
    }
}

impl CompressionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate every configured quality.
    ///
    /// # Errors
    ///
    /// Returns `CompressError::InvalidQuality` for the first bad entry.
    pub fn validate(&self) -> Result<Vec<Quality>, CompressError> {
        self.qualities.iter().map(|&q| Quality::new(q)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_batch_qualities() {
        let config = CompressionConfig::new();
        assert_eq!(config.qualities, vec![25.0, 50.0, 75.0]);
        assert_eq!(config.size_threshold_bytes, 2_097_152);
        assert!(config.output_dir.is_none());
        assert_eq!(config.validate().unwrap().len(), 3);
    }

    #[test]
    fn test_validate_reports_bad_quality() {
        let mut config = CompressionConfig::default();
        config.qualities = vec![50.0, 0.0, 120.0];
        assert_eq!(
            config.validate(),
            Err(CompressError::InvalidQuality { value: 0.0 })
        );
    }
}
