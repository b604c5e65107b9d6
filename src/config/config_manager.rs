// ==========================================
// Abrazaderas - configuration loader
// ==========================================
// Source: JSON file at ABRAZADERAS_CONFIG_PATH, else
// <config_dir>/abrazaderas/quoter.json; built-in defaults when absent.
// ==========================================

use crate::config::quoter_config::QuoterConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable that points at an explicit config file.
pub const CONFIG_PATH_ENV: &str = "ABRAZADERAS_CONFIG_PATH";

const CONFIG_DIR_NAME: &str = "abrazaderas";
const CONFIG_FILE_NAME: &str = "quoter.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

// ==========================================
// ConfigManager
// ==========================================
pub struct ConfigManager;

impl ConfigManager {
    /// Default config file location.
    ///
    /// # Order
    /// 1. `ABRAZADERAS_CONFIG_PATH` (non-empty)
    /// 2. `<config_dir>/abrazaderas/quoter.json`
    /// 3. `./quoter.json` when the platform has no config dir
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }

        match dirs::config_dir() {
            Some(dir) => dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME),
            None => PathBuf::from(CONFIG_FILE_NAME),
        }
    }

    /// Load from the default location.
    pub fn load() -> Result<QuoterConfig, ConfigError> {
        Self::load_from(&Self::default_path())
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<QuoterConfig, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(QuoterConfig::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::parse(&raw).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })?;

        info!(path = %path.display(), "quoter config loaded");
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn parse(raw: &str) -> Result<QuoterConfig, ConfigError> {
        let config: QuoterConfig =
            serde_json::from_str(raw).map_err(|source| ConfigError::Parse {
                path: "<inline>".to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Write a config as pretty JSON, creating parent directories.
    pub fn save_to(config: &QuoterConfig, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(config).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        std::fs::write(path, json).map_err(io_err)
    }
}
