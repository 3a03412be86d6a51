//! # Settings Repository
//!
//! Persists the two pieces of user preference state:
//!
//! - `currency`: the active display currency code, stored as a bare string
//!   (`PEN`, `USD` or `EUR`)
//! - `dental_app_settings`: branding, stored as `{"appName": ..., "logoUrl": ...}`
//!
//! Both fall back to their defaults when absent or unreadable.

use log::{debug, info, warn};
use shared::{AppSettingsRecord, CURRENCY_KEY, SETTINGS_KEY};
use std::sync::Arc;

use super::traits::KeyValueStore;
use crate::backend::domain::currency::Currency;
use crate::backend::domain::errors::{CatalogError, Result};
use crate::backend::domain::models::settings::AppSettings;

#[derive(Clone)]
pub struct SettingsRepository {
    store: Arc<dyn KeyValueStore>,
}

impl SettingsRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Active display currency; PEN when none was chosen yet
    pub fn load_currency(&self) -> Result<Currency> {
        let raw = self
            .store
            .get(CURRENCY_KEY)
            .map_err(|e| CatalogError::persistence(CURRENCY_KEY, e))?;

        match raw {
            None => Ok(Currency::default()),
            Some(code) => match code.parse::<Currency>() {
                Ok(currency) => Ok(currency),
                Err(e) => {
                    warn!("{}; falling back to {}", e, Currency::default());
                    Ok(Currency::default())
                }
            },
        }
    }

    pub fn save_currency(&self, currency: Currency) -> Result<()> {
        self.store
            .set(CURRENCY_KEY, currency.code())
            .map_err(|e| CatalogError::persistence(CURRENCY_KEY, e))?;
        info!("Active currency set to {}", currency);
        Ok(())
    }

    /// Branding settings, merged over the defaults
    pub fn load_settings(&self) -> Result<AppSettings> {
        let raw = self
            .store
            .get(SETTINGS_KEY)
            .map_err(|e| CatalogError::persistence(SETTINGS_KEY, e))?;

        let record = match raw {
            None => AppSettingsRecord::default(),
            Some(raw) => match serde_json::from_str::<AppSettingsRecord>(&raw) {
                Ok(record) => record,
                Err(e) => {
                    warn!("Stored settings are unreadable ({}), using defaults", e);
                    AppSettingsRecord::default()
                }
            },
        };

        Ok(AppSettings {
            app_name: record.app_name,
            logo_url: Some(record.logo_url).filter(|url| !url.trim().is_empty()),
        })
    }

    pub fn save_settings(&self, settings: &AppSettings) -> Result<()> {
        let record = AppSettingsRecord {
            app_name: settings.app_name.clone(),
            logo_url: settings.logo_url.clone().unwrap_or_default(),
        };
        let json = serde_json::to_string(&record)
            .map_err(|e| CatalogError::persistence(SETTINGS_KEY, e))?;
        self.store
            .set(SETTINGS_KEY, &json)
            .map_err(|e| CatalogError::persistence(SETTINGS_KEY, e))?;

        debug!("Saved settings: {:?}", settings);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::test_utils::TestEnvironment;

    #[test]
    fn test_currency_defaults_to_pen() {
        let env = TestEnvironment::new().unwrap();
        let repo = SettingsRepository::new(env.store());
        assert_eq!(repo.load_currency().unwrap(), Currency::Pen);
    }

    #[test]
    fn test_currency_is_stored_as_bare_code() {
        let env = TestEnvironment::new().unwrap();
        let repo = SettingsRepository::new(env.store());

        repo.save_currency(Currency::Eur).unwrap();

        assert_eq!(env.store().get(CURRENCY_KEY).unwrap().as_deref(), Some("EUR"));
        let reopened = SettingsRepository::new(env.store());
        assert_eq!(reopened.load_currency().unwrap(), Currency::Eur);
    }

    #[test]
    fn test_unknown_stored_currency_falls_back() {
        let env = TestEnvironment::new().unwrap();
        env.store().set(CURRENCY_KEY, "BTC").unwrap();

        let repo = SettingsRepository::new(env.store());
        assert_eq!(repo.load_currency().unwrap(), Currency::Pen);
    }

    #[test]
    fn test_settings_defaults_when_absent_or_broken() {
        let env = TestEnvironment::new().unwrap();
        let repo = SettingsRepository::new(env.store());
        assert_eq!(repo.load_settings().unwrap(), AppSettings::default());

        env.store().set(SETTINGS_KEY, "{broken").unwrap();
        assert_eq!(repo.load_settings().unwrap(), AppSettings::default());
    }

    #[test]
    fn test_settings_round_trip() {
        let env = TestEnvironment::new().unwrap();
        let repo = SettingsRepository::new(env.store());
        let settings = AppSettings {
            app_name: "Clínica Sonrisas".to_string(),
            logo_url: Some("https://example.com/logo.png".to_string()),
        };

        repo.save_settings(&settings).unwrap();

        assert_eq!(repo.load_settings().unwrap(), settings);
        let raw = env.store().get(SETTINGS_KEY).unwrap().unwrap();
        assert!(raw.contains("\"appName\":\"Clínica Sonrisas\""));
    }

    #[test]
    fn test_partial_settings_merge_over_defaults() {
        let env = TestEnvironment::new().unwrap();
        env.store().set(SETTINGS_KEY, r#"{"logoUrl": ""}"#).unwrap();

        let settings = SettingsRepository::new(env.store()).load_settings().unwrap();
        assert_eq!(settings.app_name, AppSettings::DEFAULT_APP_NAME);
        assert_eq!(settings.logo_url, None);
    }
}
