use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_HASH_MAX_SIZE_MB, DEFAULT_TOOL_TIMEOUT_SECS};

/// Session-wide configuration for a triage run.
///
/// Loaded from a YAML file when one is given, otherwise the defaults
/// apply. All fields are optional in the file.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TriageConfig {
    /// Per-tool execution timeout in seconds
    #[serde(default = "default_timeout")]
    pub tool_timeout_secs: u64,

    /// Recurse into directories for file listing and timeline generation
    #[serde(default = "default_recursive")]
    pub recursive: bool,

    /// Record a SHA-256 of the evidence image in the report
    #[serde(default = "default_hash_image")]
    pub hash_image: bool,

    /// Skip hashing images larger than this many megabytes
    #[serde(default = "default_hash_max_size_mb")]
    pub hash_max_size_mb: u64,
}

fn default_timeout() -> u64 {
    DEFAULT_TOOL_TIMEOUT_SECS
}

fn default_recursive() -> bool {
    true
}

fn default_hash_image() -> bool {
    true
}

fn default_hash_max_size_mb() -> u64 {
    DEFAULT_HASH_MAX_SIZE_MB
}

impl Default for TriageConfig {
    fn default() -> Self {
        TriageConfig {
            tool_timeout_secs: default_timeout(),
            recursive: default_recursive(),
            hash_image: default_hash_image(),
            hash_max_size_mb: default_hash_max_size_mb(),
        }
    }
}

impl TriageConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: TriageConfig =
            serde_yaml::from_str(&content).context("Failed to parse YAML config")?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_yaml_file(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self).context("Failed to serialize config to YAML")?;

        fs::write(path, yaml).context(format!("Failed to write config to {}", path.display()))?;

        info!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Write a default configuration file as a starting point
    pub fn create_default_config_file(path: &Path) -> Result<()> {
        TriageConfig::default().save_to_yaml_file(path)
    }
}

/// Load the configuration from the given path, falling back to defaults
/// when no path is supplied.
pub fn load_or_default(config_path: Option<&Path>) -> Result<TriageConfig> {
    match config_path {
        Some(path) => TriageConfig::from_yaml_file(path),
        None => {
            debug!("No config file given, using defaults");
            Ok(TriageConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = TriageConfig::default();
        assert_eq!(config.tool_timeout_secs, DEFAULT_TOOL_TIMEOUT_SECS);
        assert!(config.recursive);
        assert!(config.hash_image);
        assert_eq!(config.hash_max_size_mb, DEFAULT_HASH_MAX_SIZE_MB);
    }

    #[test]
    fn test_yaml_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");

        let mut config = TriageConfig::default();
        config.tool_timeout_secs = 60;
        config.recursive = false;
        config.save_to_yaml_file(&path).unwrap();

        let loaded = TriageConfig::from_yaml_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "tool_timeout_secs: 30\n").unwrap();

        let loaded = TriageConfig::from_yaml_file(&path).unwrap();
        assert_eq!(loaded.tool_timeout_secs, 30);
        assert!(loaded.recursive);
        assert!(loaded.hash_image);
    }

    #[test]
    fn test_load_or_default_without_path() {
        let config = load_or_default(None).unwrap();
        assert_eq!(config, TriageConfig::default());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = load_or_default(Some(Path::new("/nonexistent/config.yaml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_create_default_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("default.yaml");

        TriageConfig::create_default_config_file(&path).unwrap();
        assert!(path.exists());

        let loaded = TriageConfig::from_yaml_file(&path).unwrap();
        assert_eq!(loaded, TriageConfig::default());
    }
}
