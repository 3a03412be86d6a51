//! Domain model for client quotes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::generate_id;

/// A treatment or option as it was priced when picked.
///
/// The names and price are snapshots and never re-sync with the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteLineItem {
    pub treatment_id: String,
    pub treatment_name: String,
    pub option_id: Option<String>,
    pub option_name: Option<String>,
    /// Price in the reference currency (PEN)
    pub price: f64,
}

impl QuoteLineItem {
    /// "Treatment - Option", or just the treatment name
    pub fn label(&self) -> String {
        match &self.option_name {
            Some(option) => format!("{} - {}", self.treatment_name, option),
            None => self.treatment_name.clone(),
        }
    }
}

/// A saved, immutable quotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: String,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub items: Vec<QuoteLineItem>,
    /// Sum of item prices at save time; stored, not recomputed
    pub total: f64,
    pub created_at: DateTime<Utc>,
}

impl Quote {
    pub fn generate_id() -> String {
        generate_id("quote")
    }

    pub fn from_input(id: String, created_at: DateTime<Utc>, input: QuoteInput) -> Self {
        Self {
            id,
            client_name: input.client_name,
            client_phone: input.client_phone,
            items: input.items,
            total: input.total,
            created_at,
        }
    }
}

/// A frozen quote ready to be saved, produced by the quote builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteInput {
    pub client_name: String,
    pub client_phone: Option<String>,
    pub items: Vec<QuoteLineItem>,
    pub total: f64,
}
