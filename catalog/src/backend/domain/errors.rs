//! Error type shared by the domain services and repositories.

/// Every failure a catalog or quote operation can report.
///
/// Callers surface these as transient notices; none of the operations retry
/// on their own.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A required field is missing or out of range
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Treatment not found: {0}")]
    TreatmentNotFound(String),

    #[error("Option {option_id} not found in treatment {treatment_id}")]
    OptionNotFound {
        treatment_id: String,
        option_id: String,
    },

    #[error("Quote not found: {0}")]
    QuoteNotFound(String),

    #[error("Item index {index} is out of range (quote has {len} items)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Cannot save a quote without items")]
    EmptyQuote,

    #[error("Unsupported currency: {0}")]
    InvalidCurrency(String),

    /// The durable store could not be read or written
    #[error("Storage error: {0}")]
    Persistence(String),

    /// A bulk import payload was not a JSON array of treatments
    #[error("Invalid import file: {0}")]
    ImportFormat(String),
}

impl CatalogError {
    pub fn validation(message: impl Into<String>) -> Self {
        CatalogError::Validation(message.into())
    }

    pub fn persistence(key: &str, error: impl std::fmt::Display) -> Self {
        CatalogError::Persistence(format!("{}: {}", key, error))
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
