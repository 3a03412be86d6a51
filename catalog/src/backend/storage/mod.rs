//! # Storage Module
//!
//! Durable state for the catalog lives in a flat string key-value store, the
//! same shape as browser local storage. Each repository owns one key and
//! rewrites it whole on every change:
//!
//! - `dental_treatments`: the treatment catalog ([`TreatmentRepository`])
//! - `dental_budgets`: saved quotes ([`QuoteRepository`])
//! - `currency`, `dental_app_settings`: preferences ([`SettingsRepository`])
//!
//! [`FileStore`] keeps each key in a file under the data directory. Tests
//! also get `MemoryStore`, an in-memory store with an optional size quota.
//! There is no cross-process locking: two processes writing the same data
//! directory overwrite each other, last writer wins.

pub mod traits;
pub mod file_store;
pub mod records;
pub mod treatment_repository;
pub mod quote_repository;
pub mod settings_repository;

#[cfg(test)]
pub mod memory_store;
#[cfg(test)]
pub mod test_utils;

pub use traits::KeyValueStore;
pub use file_store::FileStore;
pub use treatment_repository::TreatmentRepository;
pub use quote_repository::QuoteRepository;
pub use settings_repository::SettingsRepository;

#[cfg(test)]
pub use memory_store::MemoryStore;
