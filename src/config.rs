//! Configuration System
//!
//! Layered configuration for the cask CLI: serde defaults, an optional
//! `cask.toml` file, and `CASK`-prefixed environment variable overrides
//! (e.g. `CASK_STORE__ROOT=/var/cask`). The store core itself takes a plain
//! root path and knows nothing of this layer.

use crate::error::CliError;
use crate::logging::LoggingConfig;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaskConfig {
    /// Blob store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Blob store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store root directory; `blobs/` and `partial/` live beneath it
    #[serde(default = "default_store_root")]
    pub root: PathBuf,
}

fn default_store_root() -> PathBuf {
    PathBuf::from(".cask")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: default_store_root(),
        }
    }
}

impl Default for CaskConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration, layering sources lowest-precedence first:
    /// defaults, then `cask.toml` in the working directory (or the explicit
    /// file when given, which must exist), then `CASK_*` environment
    /// variables.
    pub fn load(config_path: Option<&Path>) -> Result<CaskConfig, CliError> {
        let file_source = match config_path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("cask").required(false),
        };

        let settings = Config::builder()
            .add_source(file_source)
            .add_source(Environment::with_prefix("CASK").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
