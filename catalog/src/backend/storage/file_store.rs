//! # File Store
//!
//! A [`KeyValueStore`] that keeps each key in its own file under a base
//! directory.
//!
//! ## File Structure
//!
//! ```text
//! data/
//! ├── dental_treatments.json
//! ├── dental_budgets.json
//! ├── dental_app_settings.json
//! └── currency.json
//! ```
//!
//! Values are written verbatim. Writes go to a temp file first and are then
//! renamed over the target.

use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::traits::KeyValueStore;

/// File-backed key-value store rooted at a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    base_directory: PathBuf,
}

impl FileStore {
    /// Open a store in `base_directory`, creating the directory if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {}", base_path.display()))?;
            debug!("Created data directory {:?}", base_path);
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the file backing `key`
    fn key_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(anyhow::anyhow!("Invalid storage key: {:?}", key));
        }
        Ok(self.base_directory.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;

        if !self.base_directory.exists() {
            fs::create_dir_all(&self.base_directory)?;
        }

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, value)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        debug!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }
}
