//! # Storage Traits
//!
//! The durable store is a flat string-keyed, string-valued map, the same
//! shape as browser local storage. Repositories serialize whole collections
//! into single values, so every write is a full rewrite of one key.

use anyhow::Result;

/// Trait defining the interface for the durable key-value store
///
/// Implementations must make `set` all-or-nothing for a single key: a reader
/// sees either the previous value or the new one, never a partial write.
pub trait KeyValueStore: Send + Sync {
    /// Read a value; `None` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
