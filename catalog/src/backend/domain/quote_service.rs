use log::info;

use crate::backend::domain::commands::quote::{
    DeleteQuoteCommand, DeleteQuoteResult, SaveQuoteCommand, SaveQuoteResult,
};
use crate::backend::domain::errors::{CatalogError, Result};
use crate::backend::domain::models::quote::Quote;
use crate::backend::domain::quote_builder::QuoteBuilder;
use crate::backend::storage::QuoteRepository;

/// Service for saving and managing client quotes
pub struct QuoteService {
    repository: QuoteRepository,
}

impl QuoteService {
    pub fn new(repository: QuoteRepository) -> Self {
        Self { repository }
    }

    /// Saved quotes, oldest first
    pub fn list_quotes(&self) -> &[Quote] {
        self.repository.load_all()
    }

    pub fn get_quote(&self, quote_id: &str) -> Result<&Quote> {
        self.repository
            .get(quote_id)
            .ok_or_else(|| CatalogError::QuoteNotFound(quote_id.to_string()))
    }

    /// Freeze the builder's working list into a saved quote.
    ///
    /// The builder is cleared only after the quote is persisted, so a failed
    /// write leaves the work in progress intact.
    pub fn save_quote(&mut self, builder: &mut QuoteBuilder, command: SaveQuoteCommand) -> Result<SaveQuoteResult> {
        info!("Saving quote for client: {}", command.client_name);

        let input = builder.commit(&command.client_name, command.client_phone.as_deref())?;
        let quote = self.repository.add(input)?;
        builder.clear();

        info!("Saved quote {} with total {:.2}", quote.id, quote.total);
        Ok(SaveQuoteResult {
            quote,
            success_message: "Presupuesto guardado".to_string(),
        })
    }

    pub fn delete_quote(&mut self, command: DeleteQuoteCommand) -> Result<DeleteQuoteResult> {
        info!("Deleting quote: {}", command.quote_id);
        let quote = self.repository.remove(&command.quote_id)?;
        Ok(DeleteQuoteResult {
            quote,
            success_message: "Presupuesto eliminado".to_string(),
        })
    }
}
