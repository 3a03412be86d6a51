//! # Quote Repository
//!
//! Owns the saved quotes, persisted as one JSON array under `dental_budgets`.
//! Quotes are immutable once saved: there is no update, only add and remove.
//!
//! ## Stored Format
//!
//! ```json
//! [
//!   {
//!     "id": "quote::3d0e...",
//!     "clientName": "Ana",
//!     "clientPhone": "987654321",
//!     "items": [
//!       { "treatmentId": "treatment::...", "treatmentName": "Limpieza Dental",
//!         "subcategoryId": null, "subcategoryName": null, "price": 120 }
//!     ],
//!     "total": 120,
//!     "date": "2025-03-01T10:00:00+00:00"
//!   }
//! ]
//! ```

use chrono::Utc;
use log::{debug, info, warn};
use shared::{QuoteRecord, QUOTES_KEY};
use std::sync::Arc;

use super::records;
use super::traits::KeyValueStore;
use crate::backend::domain::errors::{CatalogError, Result};
use crate::backend::domain::models::quote::{Quote, QuoteInput};

/// Storage-backed list of saved quotes
pub struct QuoteRepository {
    store: Arc<dyn KeyValueStore>,
    quotes: Vec<Quote>,
}

impl QuoteRepository {
    /// Load saved quotes. Records that cannot be read are skipped.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let raw = store
            .get(QUOTES_KEY)
            .map_err(|e| CatalogError::persistence(QUOTES_KEY, e))?;

        let quotes: Vec<Quote> = match raw {
            Some(raw) => records::parse_collection::<QuoteRecord>(QUOTES_KEY, &raw)
                .into_iter()
                .filter_map(|record| {
                    let id = record.id.clone();
                    match records::quote_from_record(record) {
                        Ok(quote) => Some(quote),
                        Err(e) => {
                            warn!("Failed to parse quote {}: {}. Skipping.", id, e);
                            None
                        }
                    }
                })
                .collect(),
            None => Vec::new(),
        };

        debug!("Loaded {} saved quotes", quotes.len());
        Ok(Self { store, quotes })
    }

    /// Saved quotes, oldest first
    pub fn load_all(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn get(&self, quote_id: &str) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.id == quote_id)
    }

    /// Save a quote, stamping it with a fresh id and the current time
    pub fn add(&mut self, input: QuoteInput) -> Result<Quote> {
        let id = loop {
            let candidate = Quote::generate_id();
            if self.get(&candidate).is_none() {
                break candidate;
            }
        };
        let quote = Quote::from_input(id, Utc::now(), input);

        let mut next = self.quotes.clone();
        next.push(quote.clone());
        self.commit(next)?;

        info!(
            "Saved quote {} for '{}' ({} items, total {:.2})",
            quote.id,
            quote.client_name,
            quote.items.len(),
            quote.total
        );
        Ok(quote)
    }

    /// Delete a saved quote, returning what was removed
    pub fn remove(&mut self, quote_id: &str) -> Result<Quote> {
        let index = self
            .quotes
            .iter()
            .position(|q| q.id == quote_id)
            .ok_or_else(|| CatalogError::QuoteNotFound(quote_id.to_string()))?;

        let mut next = self.quotes.clone();
        let removed = next.remove(index);
        self.commit(next)?;

        info!("Removed quote {} for '{}'", removed.id, removed.client_name);
        Ok(removed)
    }

    fn commit(&mut self, next: Vec<Quote>) -> Result<()> {
        let records: Vec<QuoteRecord> = next.iter().map(records::quote_to_record).collect();
        let json = serde_json::to_string(&records)
            .map_err(|e| CatalogError::persistence(QUOTES_KEY, e))?;
        self.store
            .set(QUOTES_KEY, &json)
            .map_err(|e| CatalogError::persistence(QUOTES_KEY, e))?;

        debug!("Persisted {} quotes", next.len());
        self.quotes = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::quote::QuoteLineItem;
    use crate::backend::storage::memory_store::MemoryStore;
    use crate::backend::storage::test_utils::TestEnvironment;

    fn sample_input(client: &str) -> QuoteInput {
        let items = vec![
            QuoteLineItem {
                treatment_id: "treatment::1".to_string(),
                treatment_name: "Ortodoncia".to_string(),
                option_id: Some("option::2".to_string()),
                option_name: Some("Brackets Autoligado".to_string()),
                price: 3500.0,
            },
            QuoteLineItem {
                treatment_id: "treatment::3".to_string(),
                treatment_name: "Limpieza Dental".to_string(),
                option_id: None,
                option_name: None,
                price: 120.0,
            },
        ];
        QuoteInput {
            client_name: client.to_string(),
            client_phone: Some("987654321".to_string()),
            items,
            total: 3620.0,
        }
    }

    #[test]
    fn test_starts_empty_without_seeding() {
        let env = TestEnvironment::new().unwrap();
        let repo = QuoteRepository::load(env.store()).unwrap();
        assert!(repo.load_all().is_empty());
        assert_eq!(env.store().get(QUOTES_KEY).unwrap(), None);
    }

    #[test]
    fn test_add_assigns_id_and_timestamp() {
        let env = TestEnvironment::new().unwrap();
        let mut repo = QuoteRepository::load(env.store()).unwrap();
        let before = Utc::now();

        let quote = repo.add(sample_input("Ana")).unwrap();

        assert!(quote.id.starts_with("quote::"));
        assert!(quote.created_at >= before);
        assert_eq!(quote.total, 3620.0);
        assert_eq!(repo.load_all().len(), 1);
        assert_eq!(repo.get(&quote.id), Some(&quote));
    }

    #[test]
    fn test_quotes_survive_reload() {
        let env = TestEnvironment::new().unwrap();
        let mut repo = QuoteRepository::load(env.store()).unwrap();
        let first = repo.add(sample_input("Ana")).unwrap();
        let second = repo.add(sample_input("Luis")).unwrap();
        assert_ne!(first.id, second.id);

        let reloaded = QuoteRepository::load(env.store()).unwrap();
        assert_eq!(reloaded.load_all(), repo.load_all());
    }

    #[test]
    fn test_remove_by_id() {
        let env = TestEnvironment::new().unwrap();
        let mut repo = QuoteRepository::load(env.store()).unwrap();
        let first = repo.add(sample_input("Ana")).unwrap();
        let second = repo.add(sample_input("Luis")).unwrap();

        let removed = repo.remove(&first.id).unwrap();

        assert_eq!(removed.client_name, "Ana");
        assert_eq!(repo.load_all(), &[second]);
        assert!(matches!(repo.remove(&first.id), Err(CatalogError::QuoteNotFound(_))));
        assert_eq!(repo.load_all().len(), 1);
    }

    #[test]
    fn test_loads_legacy_quotes_and_skips_bad_dates() {
        let env = TestEnvironment::new().unwrap();
        env.store()
            .set(
                QUOTES_KEY,
                r#"[
                    {"id": 1714662245123, "clientName": "Ana", "clientPhone": "", "total": 120,
                     "items": [{"treatmentId": 1714662245000, "treatmentName": "Limpieza Dental",
                                "subcategoryId": null, "subcategoryName": null, "price": 120}],
                     "date": "2024-05-02T15:04:05.123Z"},
                    {"id": 2, "clientName": "Sin fecha", "items": [], "total": 0, "date": "ayer"}
                ]"#,
            )
            .unwrap();

        let repo = QuoteRepository::load(env.store()).unwrap();

        assert_eq!(repo.load_all().len(), 1);
        let quote = &repo.load_all()[0];
        assert_eq!(quote.id, "1714662245123");
        assert_eq!(quote.client_phone, None);
        assert_eq!(quote.items[0].treatment_id, "1714662245000");
        assert_eq!(quote.items[0].option_id, None);
    }

    #[test]
    fn test_write_failure_leaves_list_unchanged() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::with_quota(32));
        let mut repo = QuoteRepository::load(store).unwrap();

        let err = repo.add(sample_input("Ana")).unwrap_err();

        assert!(matches!(err, CatalogError::Persistence(_)));
        assert!(repo.load_all().is_empty());
    }
}
