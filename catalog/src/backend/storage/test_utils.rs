/// Test utilities module for automatic cleanup and consistent test infrastructure
///
/// The environment owns a temporary directory that is removed when it is
/// dropped, even if the test panics.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use super::file_store::FileStore;
use super::traits::KeyValueStore;

/// Temporary data directory with a file store on top of it
pub struct TestEnvironment {
    pub store: Arc<FileStore>,
    /// Base directory path for manual inspection if needed
    pub base_path: PathBuf,
    _temp_dir: TempDir, // Keep alive to prevent cleanup
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let store = FileStore::new(temp_dir.path())?;
        Ok(Self {
            store: Arc::new(store),
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }

    /// The store as the trait object repositories take
    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        self.store.clone()
    }
}
