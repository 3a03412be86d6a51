//! In-process [`KeyValueStore`], optionally limited to a byte quota the way
//! browser storage is.

use anyhow::Result;
use std::collections::HashMap;
use std::sync::Mutex;

use super::traits::KeyValueStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    /// Maximum total size of keys plus values, in bytes
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects writes once keys plus values exceed `quota` bytes
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota: Some(quota),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| anyhow::anyhow!("Memory store lock poisoned"))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.lock()?;

        if let Some(quota) = self.quota {
            let used: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = used + key.len() + value.len();
            if needed > quota {
                return Err(anyhow::anyhow!(
                    "Storage quota exceeded: {} bytes needed, {} allowed",
                    needed,
                    quota
                ));
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let store = MemoryStore::new();
        store.set("currency", "EUR").unwrap();
        assert_eq!(store.get("currency").unwrap().as_deref(), Some("EUR"));
        assert_eq!(store.get("dental_budgets").unwrap(), None);
    }

    #[test]
    fn test_quota_rejects_oversized_write_and_keeps_old_value() {
        let store = MemoryStore::with_quota(20);
        store.set("currency", "PEN").unwrap();

        let result = store.set("currency", "x".repeat(50).as_str());

        assert!(result.unwrap_err().to_string().contains("quota"));
        assert_eq!(store.get("currency").unwrap().as_deref(), Some("PEN"));
    }

    #[test]
    fn test_quota_counts_replacement_not_both_values() {
        let store = MemoryStore::with_quota(16);
        store.set("currency", "PEN").unwrap();
        store.set("currency", "USD").unwrap();
        assert_eq!(store.get("currency").unwrap().as_deref(), Some("USD"));
    }
}
