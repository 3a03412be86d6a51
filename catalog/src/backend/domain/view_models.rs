//! Display logic for the catalog, the working quote and saved quotes.
//!
//! Turns domain data into the pre-formatted view models from the `shared`
//! crate. Prices are converted to the active currency here and nowhere else;
//! dates are shown in the clinic's local time.
//!
//! ## Core Components
//!
//! - **DisplayService**: builds every view model
//! - **DisplayConfig**: active currency and the UTC offset used for dates

use chrono::{FixedOffset, Local, Offset};
use shared::{
    OptionPicker, PickerEntry, PrintDocument, QuoteCard, QuoteCardItem, QuoteRow, TreatmentCard,
    TreatmentOptionChip, WorkingQuoteView,
};

use crate::backend::domain::currency::Currency;
use crate::backend::domain::models::quote::{Quote, QuoteLineItem};
use crate::backend::domain::models::settings::AppSettings;
use crate::backend::domain::models::treatment::Treatment;
use crate::backend::domain::quote_builder::QuoteBuilder;

/// Placeholder shown in the option column when a line has no option
pub const NO_OPTION: &str = "—";

/// Subtitle of printed quotes
pub const PRINT_SUBTITLE: &str = "Presupuesto Dental";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayConfig {
    pub currency: Currency,
    pub utc_offset: FixedOffset,
}

impl DisplayConfig {
    /// Display in `currency` using the machine's current UTC offset
    pub fn local(currency: Currency) -> Self {
        Self {
            currency,
            utc_offset: Local::now().offset().fix(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DisplayService {
    config: DisplayConfig,
}

impl DisplayService {
    pub fn new(currency: Currency) -> Self {
        Self::with_config(DisplayConfig::local(currency))
    }

    pub fn with_config(config: DisplayConfig) -> Self {
        Self { config }
    }

    pub fn currency(&self) -> Currency {
        self.config.currency
    }

    fn price(&self, amount: f64) -> String {
        self.config.currency.format(amount)
    }

    pub fn treatment_cards(&self, treatments: &[Treatment]) -> Vec<TreatmentCard> {
        treatments.iter().map(|t| self.treatment_card(t)).collect()
    }

    pub fn treatment_card(&self, treatment: &Treatment) -> TreatmentCard {
        TreatmentCard {
            id: treatment.id.clone(),
            name: treatment.name.clone(),
            description: treatment.description.clone().unwrap_or_default(),
            image_url: treatment.image_url.clone(),
            formatted_price: treatment
                .shows_base_price()
                .then(|| self.price(treatment.base_price)),
            options: treatment
                .options
                .iter()
                .map(|option| TreatmentOptionChip {
                    id: option.id.clone(),
                    name: option.name.clone(),
                    formatted_price: self.price(option.price),
                    description: option.description.clone(),
                    image_url: option.image_url.clone(),
                })
                .collect(),
        }
    }

    /// Entries for the treatment selector of the quote form
    pub fn treatment_picker(&self, treatments: &[Treatment]) -> Vec<PickerEntry> {
        treatments
            .iter()
            .map(|t| PickerEntry {
                value: t.id.clone(),
                label: t.name.clone(),
            })
            .collect()
    }

    /// Option selector for the picked treatment; disabled without options
    pub fn option_picker(&self, treatment: Option<&Treatment>) -> OptionPicker {
        let entries: Vec<PickerEntry> = treatment
            .map(|t| {
                t.options
                    .iter()
                    .map(|option| PickerEntry {
                        value: option.id.clone(),
                        label: format!("{} - {}", option.name, self.price(option.price)),
                    })
                    .collect()
            })
            .unwrap_or_default();

        OptionPicker {
            enabled: !entries.is_empty(),
            entries,
        }
    }

    fn quote_row(&self, item: &QuoteLineItem) -> QuoteRow {
        QuoteRow {
            treatment_name: item.treatment_name.clone(),
            option_name: item.option_name.clone().unwrap_or_else(|| NO_OPTION.to_string()),
            formatted_price: self.price(item.price),
        }
    }

    pub fn working_quote(&self, builder: &QuoteBuilder) -> WorkingQuoteView {
        WorkingQuoteView {
            rows: builder.items().iter().map(|item| self.quote_row(item)).collect(),
            formatted_total: self.price(builder.total()),
        }
    }

    pub fn quote_cards(&self, quotes: &[Quote]) -> Vec<QuoteCard> {
        quotes.iter().map(|q| self.quote_card(q)).collect()
    }

    pub fn quote_card(&self, quote: &Quote) -> QuoteCard {
        let local = quote.created_at.with_timezone(&self.config.utc_offset);
        QuoteCard {
            id: quote.id.clone(),
            client_name: quote.client_name.clone(),
            formatted_date: local.format("%d/%m/%Y, %H:%M").to_string(),
            phone_line: quote
                .client_phone
                .as_ref()
                .map(|phone| format!("WhatsApp: {}", phone)),
            items: quote
                .items
                .iter()
                .map(|item| QuoteCardItem {
                    label: item.label(),
                    formatted_price: self.price(item.price),
                })
                .collect(),
            formatted_total: self.price(quote.total),
        }
    }

    /// Everything the printable document for `quote` shows
    pub fn print_document(&self, quote: &Quote, settings: &AppSettings) -> PrintDocument {
        let local = quote.created_at.with_timezone(&self.config.utc_offset);
        PrintDocument {
            title: format!("Presupuesto - {}", quote.client_name),
            app_name: settings.app_name.clone(),
            logo_url: settings.logo_url.clone(),
            formatted_date: local.format("%d/%m/%Y").to_string(),
            client_name: quote.client_name.clone(),
            client_phone: quote.client_phone.clone(),
            rows: quote.items.iter().map(|item| self.quote_row(item)).collect(),
            formatted_total: self.price(quote.total),
        }
    }
}
