//! Domain-level command and result types
//!
//! Services take commands and return results carrying the affected entity
//! plus the notice to show the user. Presentation layers map their own input
//! (CLI arguments, form fields) onto these.

pub mod treatment {
    use crate::backend::domain::models::treatment::Treatment;

    /// Command for deleting a treatment. Callers confirm with the user first.
    #[derive(Debug, Clone)]
    pub struct DeleteTreatmentCommand {
        pub treatment_id: String,
    }

    /// Result of saving a treatment draft.
    #[derive(Debug, Clone)]
    pub struct SaveTreatmentResult {
        pub treatment: Treatment,
        /// True when the draft created a new treatment rather than editing one
        pub created: bool,
        /// Image URLs that do not look like images; saved anyway
        pub suspicious_image_urls: Vec<String>,
        pub success_message: String,
    }

    /// Result of deleting a treatment.
    #[derive(Debug, Clone)]
    pub struct DeleteTreatmentResult {
        pub treatment: Treatment,
        pub success_message: String,
    }

    /// Result of a bulk import.
    #[derive(Debug, Clone)]
    pub struct ImportTreatmentsResult {
        pub imported_count: usize,
        pub success_message: String,
    }
}

pub mod quote {
    use crate::backend::domain::models::quote::Quote;

    /// Input for saving the quote being built.
    #[derive(Debug, Clone, Default)]
    pub struct SaveQuoteCommand {
        pub client_name: String,
        pub client_phone: Option<String>,
    }

    /// Command for deleting a saved quote. Callers confirm with the user first.
    #[derive(Debug, Clone)]
    pub struct DeleteQuoteCommand {
        pub quote_id: String,
    }

    /// Result of saving a quote.
    #[derive(Debug, Clone)]
    pub struct SaveQuoteResult {
        pub quote: Quote,
        pub success_message: String,
    }

    /// Result of deleting a quote.
    #[derive(Debug, Clone)]
    pub struct DeleteQuoteResult {
        pub quote: Quote,
        pub success_message: String,
    }
}

pub mod settings {
    use crate::backend::domain::currency::Currency;
    use crate::backend::domain::models::settings::AppSettings;

    /// Input for updating branding settings.
    #[derive(Debug, Clone)]
    pub struct UpdateSettingsCommand {
        pub app_name: String,
        pub logo_url: String,
    }

    /// Result of updating branding settings.
    #[derive(Debug, Clone)]
    pub struct UpdateSettingsResult {
        pub settings: AppSettings,
        /// The logo URL does not look like an image; saved anyway
        pub suspicious_logo_url: bool,
        pub success_message: String,
    }

    /// Result of switching the display currency.
    #[derive(Debug, Clone)]
    pub struct SetCurrencyResult {
        pub currency: Currency,
    }
}
