//! Configuration file loading.

use std::path::Path;

use anyhow::{Context, Result};
use blockjpeg_core::CompressionConfig;

/// Load settings from a JSON file, or defaults when no path is given.
///
/// Missing fields fall back to their defaults.
pub fn load(path: Option<&Path>) -> Result<CompressionConfig> {
    let Some(path) = path else {
        return Ok(CompressionConfig::default());
    };

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: CompressionConfig = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid qualities in {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults_without_path() {
        assert_eq!(load(None).unwrap(), CompressionConfig::default());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blockjpeg.json");
        std::fs::write(&path, r#"{ "qualities": [10, 90], "output_dir": "outputs" }"#).unwrap();

        let config = load(Some(&path)).unwrap();
        assert_eq!(config.qualities, vec![10.0, 90.0]);
        assert_eq!(config.output_dir.as_deref(), Some(Path::new("outputs")));
        assert_eq!(
            config.size_threshold_bytes,
            CompressionConfig::default().size_threshold_bytes
        );
    }

    #[test]
    fn test_load_rejects_bad_quality() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blockjpeg.json");
        std::fs::write(&path, r#"{ "qualities": [0] }"#).unwrap();
        assert!(load(Some(&path)).is_err());
    }
}
