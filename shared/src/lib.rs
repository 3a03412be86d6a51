//! Wire records and view models shared between the catalog backend and any
//! presentation layer.
//!
//! The `*Record` types mirror the durable storage layout exactly, including the
//! Spanish field names of the treatment catalog (`nombre`, `precio`,
//! `subcategorias`, ...). Data written by older versions used numeric ids and
//! occasionally `null` for empty text, so deserialization is lenient about both.
//!
//! The view models are plain structs with every value already formatted for
//! display. Renderers only lay them out.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Storage key holding the treatment catalog
pub const TREATMENTS_KEY: &str = "dental_treatments";
/// Storage key holding the saved quotes
pub const QUOTES_KEY: &str = "dental_budgets";
/// Storage key holding the active display currency code
pub const CURRENCY_KEY: &str = "currency";
/// Storage key holding the branding settings
pub const SETTINGS_KEY: &str = "dental_app_settings";

// ---------------------------------------------------------------------------
// Storage records
// ---------------------------------------------------------------------------

/// A catalog treatment as persisted under [`TREATMENTS_KEY`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentRecord {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub nombre: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub descripcion: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub precio: f64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub imagen: String,
    #[serde(default, deserialize_with = "lenient::list")]
    pub subcategorias: Vec<TreatmentOptionRecord>,
}

/// A priced treatment variant, nested in [`TreatmentRecord::subcategorias`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentOptionRecord {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub nombre: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub precio: f64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub descripcion: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub imagen: String,
}

/// A saved quote as persisted under [`QUOTES_KEY`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRecord {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub client_name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub client_phone: String,
    #[serde(default)]
    pub items: Vec<QuoteLineItemRecord>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub total: f64,
    /// RFC 3339 timestamp of when the quote was saved
    pub date: String,
}

/// One line of a saved quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLineItemRecord {
    #[serde(deserialize_with = "lenient::id")]
    pub treatment_id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub treatment_name: String,
    #[serde(default, deserialize_with = "lenient::optional_id")]
    pub subcategory_id: Option<String>,
    #[serde(default)]
    pub subcategory_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub price: f64,
}

/// Branding settings as persisted under [`SETTINGS_KEY`].
///
/// Missing fields fall back to the defaults, so a partial object written by
/// hand still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettingsRecord {
    #[serde(default = "AppSettingsRecord::default_app_name")]
    pub app_name: String,
    #[serde(default)]
    pub logo_url: String,
}

impl AppSettingsRecord {
    pub const DEFAULT_APP_NAME: &'static str = "Catálogo Dental";

    fn default_app_name() -> String {
        Self::DEFAULT_APP_NAME.to_string()
    }
}

impl Default for AppSettingsRecord {
    fn default() -> Self {
        Self {
            app_name: Self::default_app_name(),
            logo_url: String::new(),
        }
    }
}

mod lenient {
    use super::*;

    pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(optional_id(deserializer)?.unwrap_or_default())
    }

    pub fn optional_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(other) => Err(serde::de::Error::custom(format!("invalid id: {}", other))),
        }
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }

    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(0.0),
            Some(Value::Number(n)) => n
                .as_f64()
                .ok_or_else(|| serde::de::Error::custom("number out of range")),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(0.0),
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| serde::de::Error::custom(format!("invalid number: {}", s))),
            Some(other) => Err(serde::de::Error::custom(format!("invalid number: {}", other))),
        }
    }

    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// View models
// ---------------------------------------------------------------------------

/// A catalog card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    /// Only present for treatments without options and a positive base price
    pub formatted_price: Option<String>,
    pub options: Vec<TreatmentOptionChip>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentOptionChip {
    pub id: String,
    pub name: String,
    pub formatted_price: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// One entry of a selection list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickerEntry {
    pub value: String,
    pub label: String,
}

/// Option selector for the treatment currently picked in the quote form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionPicker {
    /// False when the treatment has no options to choose from
    pub enabled: bool,
    pub entries: Vec<PickerEntry>,
}

/// A row of a quote table (working quote or print document)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRow {
    pub treatment_name: String,
    /// Option name, or an em dash placeholder when none was chosen
    pub option_name: String,
    pub formatted_price: String,
}

/// The quote currently being assembled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingQuoteView {
    pub rows: Vec<QuoteRow>,
    pub formatted_total: String,
}

/// A saved quote card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteCard {
    pub id: String,
    pub client_name: String,
    pub formatted_date: String,
    pub phone_line: Option<String>,
    pub items: Vec<QuoteCardItem>,
    pub formatted_total: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteCardItem {
    pub label: String,
    pub formatted_price: String,
}

/// Everything a printable quote document shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintDocument {
    pub title: String,
    pub app_name: String,
    pub logo_url: Option<String>,
    pub formatted_date: String,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub rows: Vec<QuoteRow>,
    pub formatted_total: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_treatment_record_accepts_legacy_numeric_ids() {
        let json = r#"{
            "id": 1717171717171,
            "nombre": "Endodoncia",
            "descripcion": "Tratamiento de conducto",
            "precio": 700,
            "imagen": "",
            "subcategorias": [{"id": 4, "nombre": "Monoradicular", "precio": 600}]
        }"#;

        let record: TreatmentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "1717171717171");
        assert_eq!(record.precio, 700.0);
        assert_eq!(record.subcategorias[0].id, "4");
        assert_eq!(record.subcategorias[0].descripcion, "");
    }

    #[test]
    fn test_treatment_record_tolerates_nulls_and_missing_fields() {
        let json = r#"{"nombre": "Limpieza", "descripcion": null, "precio": null, "subcategorias": null}"#;

        let record: TreatmentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "");
        assert_eq!(record.descripcion, "");
        assert_eq!(record.precio, 0.0);
        assert!(record.subcategorias.is_empty());
    }

    #[test]
    fn test_treatment_record_rejects_non_numeric_price() {
        let json = r#"{"nombre": "Limpieza", "precio": "gratis"}"#;
        assert!(serde_json::from_str::<TreatmentRecord>(json).is_err());
    }

    #[test]
    fn test_quote_record_uses_camel_case_keys() {
        let record = QuoteRecord {
            id: "quote::1".to_string(),
            client_name: "Ana".to_string(),
            client_phone: String::new(),
            items: vec![QuoteLineItemRecord {
                treatment_id: "treatment::1".to_string(),
                treatment_name: "Limpieza Dental".to_string(),
                subcategory_id: None,
                subcategory_name: None,
                price: 120.0,
            }],
            total: 120.0,
            date: "2025-03-01T10:00:00Z".to_string(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["clientName"], "Ana");
        assert_eq!(value["items"][0]["treatmentName"], "Limpieza Dental");
        assert!(value["items"][0]["subcategoryId"].is_null());
    }

    #[test]
    fn test_settings_record_merges_over_defaults() {
        let record: AppSettingsRecord = serde_json::from_str(r#"{"logoUrl": "https://x.test/logo.png"}"#).unwrap();
        assert_eq!(record.app_name, AppSettingsRecord::DEFAULT_APP_NAME);
        assert_eq!(record.logo_url, "https://x.test/logo.png");
    }
}
