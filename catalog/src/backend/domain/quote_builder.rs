//! The quote being assembled in the current session.
//!
//! A `QuoteBuilder` is transient working state: it is never persisted and is
//! gone when the session ends. Saving hands a frozen [`QuoteInput`] to the
//! quote repository; the builder itself never touches storage.

use chrono::Utc;
use log::{debug, info};

use crate::backend::domain::errors::{CatalogError, Result};
use crate::backend::domain::models::generate_id;
use crate::backend::domain::models::quote::{Quote, QuoteInput, QuoteLineItem};
use crate::backend::domain::models::treatment::Treatment;

#[derive(Debug, Clone, Default)]
pub struct QuoteBuilder {
    items: Vec<QuoteLineItem>,
    client_name: String,
    client_phone: String,
}

impl QuoteBuilder {
    /// Client name stored when a quote is saved without one
    pub const UNNAMED_CLIENT: &'static str = "Cliente sin nombre";
    /// Client name shown when previewing a quote without one
    pub const PREVIEW_CLIENT: &'static str = "Cliente";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[QuoteLineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn client_phone(&self) -> &str {
        &self.client_phone
    }

    /// Remember the client fields typed so far
    pub fn set_client(&mut self, name: &str, phone: &str) {
        self.client_name = name.to_string();
        self.client_phone = phone.to_string();
    }

    /// Append a line for `treatment_id`, priced from the chosen option or from
    /// the base price when no option is given.
    ///
    /// A treatment with options must be added through one of them; its base
    /// price is not selectable.
    ///
    /// Looks the treatment up in `catalog` so a stale selection (the treatment
    /// or option was deleted meanwhile) fails instead of adding a dangling
    /// line. The working list is untouched on failure.
    pub fn add_item(
        &mut self,
        catalog: &[Treatment],
        treatment_id: &str,
        option_id: Option<&str>,
    ) -> Result<QuoteLineItem> {
        let treatment = catalog
            .iter()
            .find(|t| t.id == treatment_id)
            .ok_or_else(|| CatalogError::TreatmentNotFound(treatment_id.to_string()))?;

        let item = match option_id.filter(|id| !id.is_empty()) {
            Some(option_id) => {
                let option = treatment.find_option(option_id).ok_or_else(|| CatalogError::OptionNotFound {
                    treatment_id: treatment.id.clone(),
                    option_id: option_id.to_string(),
                })?;
                QuoteLineItem {
                    treatment_id: treatment.id.clone(),
                    treatment_name: treatment.name.clone(),
                    option_id: Some(option.id.clone()),
                    option_name: Some(option.name.clone()),
                    price: option.price,
                }
            }
            None if treatment.has_options() => {
                return Err(CatalogError::validation(format!(
                    "{} must be quoted through one of its options",
                    treatment.name
                )));
            }
            None => QuoteLineItem {
                treatment_id: treatment.id.clone(),
                treatment_name: treatment.name.clone(),
                option_id: None,
                option_name: None,
                price: treatment.base_price,
            },
        };

        debug!("Adding quote line: {} ({})", item.label(), item.price);
        self.items.push(item.clone());
        Ok(item)
    }

    /// Remove the line at `index` (0-based)
    pub fn remove_item(&mut self, index: usize) -> Result<QuoteLineItem> {
        if index >= self.items.len() {
            return Err(CatalogError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Sum of line prices in the reference currency
    pub fn total(&self) -> f64 {
        self.items.iter().fold(0.0, |acc, item| acc + item.price)
    }

    /// Empty the working list and forget the client fields
    pub fn clear(&mut self) {
        self.items.clear();
        self.client_name.clear();
        self.client_phone.clear();
    }

    /// Freeze the working list into a quote ready to be saved.
    ///
    /// Does not clear the builder; the caller does that once the quote is
    /// safely persisted.
    pub fn commit(&self, client_name: &str, client_phone: Option<&str>) -> Result<QuoteInput> {
        if self.items.is_empty() {
            return Err(CatalogError::EmptyQuote);
        }

        let client_name = match client_name.trim() {
            "" => Self::UNNAMED_CLIENT.to_string(),
            name => name.to_string(),
        };
        let client_phone = client_phone
            .map(str::trim)
            .filter(|phone| !phone.is_empty())
            .map(str::to_string);

        info!("Committing quote for {} with {} items", client_name, self.items.len());

        Ok(QuoteInput {
            client_name,
            client_phone,
            items: self.items.clone(),
            total: self.total(),
        })
    }

    /// A throwaway quote for printing the working list before it is saved.
    ///
    /// Dated now, never persisted. Uses the pending client fields.
    pub fn preview(&self) -> Result<Quote> {
        if self.items.is_empty() {
            return Err(CatalogError::EmptyQuote);
        }

        let client_name = match self.client_name.trim() {
            "" => Self::PREVIEW_CLIENT.to_string(),
            name => name.to_string(),
        };
        let client_phone = Some(self.client_phone.trim())
            .filter(|phone| !phone.is_empty())
            .map(str::to_string);

        Ok(Quote {
            id: generate_id("preview"),
            client_name,
            client_phone,
            items: self.items.clone(),
            total: self.total(),
            created_at: Utc::now(),
        })
    }
}
