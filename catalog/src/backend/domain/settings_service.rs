use log::{info, warn};

use crate::backend::domain::catalog_service::is_valid_image_url;
use crate::backend::domain::commands::settings::{
    SetCurrencyResult, UpdateSettingsCommand, UpdateSettingsResult,
};
use crate::backend::domain::currency::Currency;
use crate::backend::domain::errors::Result;
use crate::backend::domain::models::settings::AppSettings;
use crate::backend::storage::SettingsRepository;

/// Service for the display currency and branding preferences.
///
/// The active currency is read once at startup and cached; it only changes
/// through [`SettingsService::set_currency`].
pub struct SettingsService {
    repository: SettingsRepository,
    currency: Currency,
}

impl SettingsService {
    pub fn load(repository: SettingsRepository) -> Result<Self> {
        let currency = repository.load_currency()?;
        Ok(Self { repository, currency })
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn set_currency(&mut self, currency: Currency) -> Result<SetCurrencyResult> {
        self.repository.save_currency(currency)?;
        self.currency = currency;
        Ok(SetCurrencyResult { currency })
    }

    pub fn settings(&self) -> Result<AppSettings> {
        self.repository.load_settings()
    }

    /// Save branding. A blank name falls back to the default one.
    pub fn update_settings(&self, command: UpdateSettingsCommand) -> Result<UpdateSettingsResult> {
        let app_name = match command.app_name.trim() {
            "" => AppSettings::DEFAULT_APP_NAME.to_string(),
            name => name.to_string(),
        };
        let logo_url = command.logo_url.trim();
        let suspicious_logo_url = !is_valid_image_url(logo_url);
        if suspicious_logo_url {
            warn!("Saving a logo URL that does not look like an image: {}", logo_url);
        }

        let settings = AppSettings {
            app_name,
            logo_url: Some(logo_url.to_string()).filter(|url| !url.is_empty()),
        };
        self.repository.save_settings(&settings)?;

        info!("Updated settings: app name '{}'", settings.app_name);
        Ok(UpdateSettingsResult {
            settings,
            suspicious_logo_url,
            success_message: "Ajustes guardados".to_string(),
        })
    }
}
