//! # Application Config
//!
//! Optional YAML file controlling where the catalog keeps its data and how
//! much it logs. Every field has a default, so the file may be absent or
//! partial.
//!
//! ```yaml
//! data_directory: "/srv/clinica/catalogo"
//! log_level: "info"
//! ```
//!
//! User state (active currency, branding) is not config; it lives in the
//! data directory next to the catalog.

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "DENTAL_CATALOG_DATA_DIR";

/// Directory name used under the platform data directory
const DEFAULT_DATA_DIR_NAME: &str = "Catalogo Dental";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the key-value files live; the platform data directory if unset
    pub data_directory: Option<PathBuf>,
    /// Default `env_logger` filter when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_directory: None,
            log_level: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// `<platform config dir>/dental-catalog/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dental-catalog").join("config.yaml"))
    }

    /// Load the config at `path`. A missing file yields the defaults; a file
    /// that exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        if yaml_content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: AppConfig = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;

        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Load from an explicit path, or from the default location when none is given
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => match Self::default_path() {
                Some(path) => Self::load(&path),
                None => Ok(Self::default()),
            },
        }
    }

    /// Pick the data directory: command-line flag, then environment, then
    /// this config, then the platform data directory.
    pub fn resolve_data_directory(
        &self,
        cli_override: Option<PathBuf>,
        env_override: Option<PathBuf>,
    ) -> Result<PathBuf> {
        if let Some(dir) = cli_override {
            return Ok(dir);
        }
        if let Some(dir) = env_override.filter(|dir| !dir.as_os_str().is_empty()) {
            return Ok(dir);
        }
        if let Some(dir) = &self.data_directory {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(DEFAULT_DATA_DIR_NAME))
            .context("Could not determine a data directory; pass --data-dir or set DENTAL_CATALOG_DATA_DIR")
    }
}
