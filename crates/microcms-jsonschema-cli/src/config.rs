//! Configuration management for the CLI
//!
//! Configuration comes from, in order of precedence:
//! - Command-line arguments
//! - An explicit configuration file (`--config` or `MICROCMS_JSONSCHEMA_CONFIG`)
//! - The first configuration file found in the default locations
//! - Default values

use crate::error::{Error, Result};
use microcms_jsonschema::loader::Format;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const APP_DIR: &str = "microcms-jsonschema";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Conversion defaults
    pub convert: ConvertConfig,

    /// Bundle command defaults
    pub bundle: BundleConfig,

    /// Output settings
    pub output: OutputConfig,
}

/// Conversion defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Emit x-microcms-* keys even without `--extensions`
    pub include_extensions: bool,

    /// Copy descriptions and text limits even without `--annotations`
    pub include_annotations: bool,
}

/// Bundle command defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    /// Directory for per-endpoint files when `--out-dir` is not given
    pub out_dir: Option<PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Use colored output by default
    pub color: bool,

    /// Pretty-print JSON written to files
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            pretty: true,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let format = Format::from_path(path)
            .map_err(|e| Error::config(e.to_string()))?;
        let content = std::fs::read_to_string(path)?;

        let config = match format {
            Format::Yaml => serde_yaml::from_str(&content)?,
            Format::Json => serde_json::from_str(&content)?,
        };

        debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Failed to load config, skipping");
                    }
                }
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Location of the per-user configuration file
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.yaml"))
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".microcms-jsonschema.yaml"),
            PathBuf::from(".microcms-jsonschema.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let app_dir = config_dir.join(APP_DIR);
            paths.push(app_dir.join("config.yaml"));
            paths.push(app_dir.join("config.json"));
        }

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".microcms-jsonschema.yaml"));
            paths.push(home_dir.join(".microcms-jsonschema.json"));
        }

        paths
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let format = Format::from_path(path)
            .map_err(|e| Error::config(e.to_string()))?;

        let content = match format {
            Format::Yaml => serde_yaml::to_string(self)?,
            Format::Json => serde_json::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}
