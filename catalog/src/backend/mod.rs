//! # Backend Module
//!
//! Wires the storage layer to the domain services. Presentation layers (the
//! CLI today) hold a [`Backend`] and talk only to its services.
//!
//! - `domain`: business rules, services and view models
//! - `storage`: key-value stores and the repositories on top of them
//! - `io`: export/import files, printable quotes and WhatsApp links

use anyhow::Context;
use log::info;
use std::path::Path;
use std::sync::Arc;

pub mod domain;
pub mod io;
pub mod storage;

use domain::{CatalogService, DisplayService, QuoteService, Result, SettingsService};
use storage::{FileStore, KeyValueStore, QuoteRepository, SettingsRepository, TreatmentRepository};

/// Main backend struct that owns all services
pub struct Backend {
    pub catalog_service: CatalogService,
    pub quote_service: QuoteService,
    pub settings_service: SettingsService,
}

impl Backend {
    /// Load every repository from `store`, seeding the catalog if it is empty
    pub fn new(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let catalog_service = CatalogService::new(TreatmentRepository::load(store.clone())?);
        let quote_service = QuoteService::new(QuoteRepository::load(store.clone())?);
        let settings_service = SettingsService::load(SettingsRepository::new(store))?;

        Ok(Backend {
            catalog_service,
            quote_service,
            settings_service,
        })
    }

    /// Open the file-backed store in `data_directory`
    pub fn open<P: AsRef<Path>>(data_directory: P) -> anyhow::Result<Self> {
        let data_directory = data_directory.as_ref();
        let store = FileStore::new(data_directory)
            .with_context(|| format!("Failed to open data directory {:?}", data_directory))?;
        info!("Opening catalog data in {:?}", store.base_directory());
        let backend = Self::new(Arc::new(store))
            .with_context(|| format!("Failed to load catalog data from {:?}", data_directory))?;
        Ok(backend)
    }

    /// View-model builder for the active currency
    pub fn display(&self) -> DisplayService {
        DisplayService::new(self.settings_service.currency())
    }
}
