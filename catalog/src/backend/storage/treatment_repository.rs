//! # Treatment Repository
//!
//! Owns the treatment catalog. The whole list is kept in memory and rewritten
//! to the `dental_treatments` key after every mutation.
//!
//! ## Stored Format
//!
//! ```json
//! [
//!   {
//!     "id": "treatment::6f1c...",
//!     "nombre": "Ortodoncia",
//!     "descripcion": "Alineación dental con brackets",
//!     "precio": 2500,
//!     "imagen": "https://...",
//!     "subcategorias": [
//!       { "id": "option::9a2b...", "nombre": "Brackets Metálicos", "precio": 2500, "descripcion": "...", "imagen": "" }
//!     ]
//!   }
//! ]
//! ```
//!
//! The repository stores what it is given. Name and price rules are enforced
//! by the catalog service before it gets here.

use log::{debug, info, warn};
use shared::{TreatmentRecord, TREATMENTS_KEY};
use std::collections::HashSet;
use std::sync::Arc;

use super::records;
use super::traits::KeyValueStore;
use crate::backend::domain::default_catalog::default_treatments;
use crate::backend::domain::errors::{CatalogError, Result};
use crate::backend::domain::models::treatment::{Treatment, TreatmentInput, TreatmentOption};

/// Storage-backed treatment catalog
pub struct TreatmentRepository {
    store: Arc<dyn KeyValueStore>,
    treatments: Vec<Treatment>,
}

impl TreatmentRepository {
    /// Load the catalog from the store.
    ///
    /// An absent, unreadable or empty catalog is replaced by the built-in
    /// defaults, which are persisted right away.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let raw = store
            .get(TREATMENTS_KEY)
            .map_err(|e| CatalogError::persistence(TREATMENTS_KEY, e))?;

        let mut treatments: Vec<Treatment> = match raw {
            Some(raw) => records::parse_collection::<TreatmentRecord>(TREATMENTS_KEY, &raw)
                .into_iter()
                .map(records::treatment_from_record)
                .collect(),
            None => Vec::new(),
        };

        let mut repository = Self {
            store,
            treatments: Vec::new(),
        };

        if treatments.is_empty() {
            info!("No stored treatments found, seeding the default catalog");
            let seeded = Self::with_fresh_ids(default_treatments());
            repository.commit(seeded)?;
        } else {
            if Self::ensure_unique_ids(&mut treatments) {
                repository.commit(treatments)?;
            } else {
                repository.treatments = treatments;
            }
            debug!("Loaded {} treatments", repository.treatments.len());
        }

        Ok(repository)
    }

    /// Current catalog, in persisted order
    pub fn load_all(&self) -> &[Treatment] {
        &self.treatments
    }

    pub fn get(&self, treatment_id: &str) -> Option<&Treatment> {
        self.treatments.iter().find(|t| t.id == treatment_id)
    }

    /// Append a new treatment under a fresh id
    pub fn add(&mut self, input: TreatmentInput) -> Result<Treatment> {
        let id = Self::fresh_id(&self.treatments);
        let mut treatment = Treatment::from_input(id, input);
        Self::ensure_unique_option_ids(&mut treatment);

        let mut next = self.treatments.clone();
        next.push(treatment.clone());
        self.commit(next)?;

        info!("Added treatment '{}' with ID: {}", treatment.name, treatment.id);
        Ok(treatment)
    }

    /// Replace every field of a treatment except its id and list position
    pub fn update(&mut self, treatment_id: &str, input: TreatmentInput) -> Result<Treatment> {
        let index = self
            .position(treatment_id)
            .ok_or_else(|| CatalogError::TreatmentNotFound(treatment_id.to_string()))?;

        let mut treatment = Treatment::from_input(treatment_id.to_string(), input);
        Self::ensure_unique_option_ids(&mut treatment);

        let mut next = self.treatments.clone();
        next[index] = treatment.clone();
        self.commit(next)?;

        info!("Updated treatment '{}' ({})", treatment.name, treatment.id);
        Ok(treatment)
    }

    /// Delete a treatment, returning what was removed
    pub fn remove(&mut self, treatment_id: &str) -> Result<Treatment> {
        let index = self
            .position(treatment_id)
            .ok_or_else(|| CatalogError::TreatmentNotFound(treatment_id.to_string()))?;

        let mut next = self.treatments.clone();
        let removed = next.remove(index);
        self.commit(next)?;

        info!("Removed treatment '{}' ({})", removed.name, removed.id);
        Ok(removed)
    }

    /// Replace the whole catalog.
    ///
    /// Every treatment and option gets a new id, whatever it carried before,
    /// so imported data can never collide with ids from another catalog.
    pub fn replace_all<I, T>(&mut self, list: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<TreatmentInput>,
    {
        let inputs: Vec<TreatmentInput> = list.into_iter().map(Into::into).collect();
        let next = Self::with_fresh_ids(inputs);
        let count = next.len();
        self.commit(next)?;

        info!("Replaced catalog with {} treatments", count);
        Ok(())
    }

    fn position(&self, treatment_id: &str) -> Option<usize> {
        self.treatments.iter().position(|t| t.id == treatment_id)
    }

    /// Persist `next`, then adopt it. On a failed write the in-memory list is untouched.
    fn commit(&mut self, next: Vec<Treatment>) -> Result<()> {
        let records: Vec<TreatmentRecord> = next.iter().map(records::treatment_to_record).collect();
        let json = serde_json::to_string(&records)
            .map_err(|e| CatalogError::persistence(TREATMENTS_KEY, e))?;
        self.store
            .set(TREATMENTS_KEY, &json)
            .map_err(|e| CatalogError::persistence(TREATMENTS_KEY, e))?;

        debug!("Persisted {} treatments", next.len());
        self.treatments = next;
        Ok(())
    }

    fn fresh_id(existing: &[Treatment]) -> String {
        loop {
            let id = Treatment::generate_id();
            if !existing.iter().any(|t| t.id == id) {
                return id;
            }
        }
    }

    fn with_fresh_ids(inputs: Vec<TreatmentInput>) -> Vec<Treatment> {
        let mut treatments: Vec<Treatment> = Vec::with_capacity(inputs.len());
        for input in inputs {
            let id = Self::fresh_id(&treatments);
            let mut treatment = Treatment::from_input(id, input);
            for option in treatment.options.iter_mut() {
                option.id = String::new();
            }
            Self::ensure_unique_option_ids(&mut treatment);
            treatments.push(treatment);
        }
        treatments
    }

    /// Give options with a blank or repeated id a new one
    fn ensure_unique_option_ids(treatment: &mut Treatment) -> bool {
        let mut changed = false;
        let mut seen = HashSet::new();
        for index in 0..treatment.options.len() {
            let current = treatment.options[index].id.clone();
            if current.is_empty() || !seen.insert(current.clone()) {
                let id = loop {
                    let candidate = TreatmentOption::generate_id();
                    if !treatment.options.iter().any(|o| o.id == candidate) {
                        break candidate;
                    }
                };
                seen.insert(id.clone());
                treatment.options[index].id = id;
                changed = true;
            }
        }
        changed
    }

    /// Repair stored data with missing or duplicated ids. Returns true if anything changed.
    fn ensure_unique_ids(treatments: &mut [Treatment]) -> bool {
        let mut changed = false;
        let mut seen = HashSet::new();
        for index in 0..treatments.len() {
            let current = treatments[index].id.clone();
            if current.is_empty() || !seen.insert(current.clone()) {
                let id = Self::fresh_id(treatments);
                warn!(
                    "Treatment '{}' had a missing or duplicate id ({:?}), assigned {}",
                    treatments[index].name, current, id
                );
                seen.insert(id.clone());
                treatments[index].id = id;
                changed = true;
            }
            if Self::ensure_unique_option_ids(&mut treatments[index]) {
                changed = true;
            }
        }
        changed
    }
}
