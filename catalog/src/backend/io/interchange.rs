//! JSON export and import of the treatment catalog.
//!
//! The file format is the stored format: a pretty-printed array of treatment
//! records, so an exported file can be imported on another machine as is.

use chrono::NaiveDate;
use log::{debug, warn};
use serde_json::Value;
use shared::TreatmentRecord;

use crate::backend::domain::errors::{CatalogError, Result};
use crate::backend::domain::models::treatment::{Treatment, TreatmentInput};
use crate::backend::storage::records;

/// Serialize the catalog as a 2-space indented JSON array
pub fn export_treatments(treatments: &[Treatment]) -> Result<String> {
    let records: Vec<TreatmentRecord> = treatments.iter().map(records::treatment_to_record).collect();
    serde_json::to_string_pretty(&records)
        .map_err(|e| CatalogError::Persistence(format!("export: {}", e)))
}

/// Suggested download name, e.g. `tratamientos_2025-03-01.json`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("tratamientos_{}.json", date.format("%Y-%m-%d"))
}

/// Parse an import file into treatments ready for a wholesale replace.
///
/// The whole payload is rejected if it is not a JSON array or if any element
/// is not a treatment object; a partial import never happens. Ids in the file
/// are dropped by the repository on replace.
pub fn parse_import(json: &str) -> Result<Vec<TreatmentInput>> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| CatalogError::ImportFormat(format!("not valid JSON: {}", e)))?;

    let elements = match value {
        Value::Array(elements) => elements,
        other => {
            warn!("Rejected import: top-level value is not an array");
            return Err(CatalogError::ImportFormat(format!(
                "expected an array of treatments, found {}",
                json_type(&other)
            )));
        }
    };

    let mut treatments = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        if !element.is_object() {
            return Err(CatalogError::ImportFormat(format!(
                "element {} is {}, not a treatment object",
                index,
                json_type(&element)
            )));
        }
        let record: TreatmentRecord = serde_json::from_value(element)
            .map_err(|e| CatalogError::ImportFormat(format!("element {}: {}", index, e)))?;
        treatments.push(TreatmentInput::from(records::treatment_from_record(record)));
    }

    debug!("Parsed {} treatments from import", treatments.len());
    Ok(treatments)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::treatment::TreatmentOption;

    #[test]
    fn test_export_uses_stored_field_names_and_indentation() {
        let treatments = vec![Treatment {
            id: "treatment::1".to_string(),
            name: "Endodoncia".to_string(),
            description: None,
            base_price: 700.0,
            image_url: None,
            options: vec![TreatmentOption {
                id: "option::1".to_string(),
                name: "Monoradicular".to_string(),
                price: 600.0,
                description: None,
                image_url: None,
            }],
        }];

        let json = export_treatments(&treatments).unwrap();
        assert!(json.starts_with("[\n  {\n    \"id\": \"treatment::1\""));
        assert!(json.contains("\"nombre\": \"Endodoncia\""));
        assert!(json.contains("\"subcategorias\""));

        let parsed = parse_import(&json).unwrap();
        assert_eq!(parsed[0].name, "Endodoncia");
        assert_eq!(parsed[0].options[0].price, 600.0);
    }

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(export_file_name(date), "tratamientos_2025-03-01.json");
    }

    #[test]
    fn test_import_accepts_hand_written_files() {
        let json = r#"[
            {"nombre": "Profilaxis", "precio": "90"},
            {"id": 7, "nombre": "Corona", "precio": 800, "imagen": "", "subcategorias": []},
            {"nombre": "Carillas", "precio": 0, "subcategorias": [{"nombre": "Resina", "precio": 350}]}
        ]"#;

        let treatments = parse_import(json).unwrap();
        assert_eq!(treatments.len(), 3);
        assert_eq!(treatments[0].base_price, 90.0);
        assert_eq!(treatments[1].image_url, None);
        assert_eq!(treatments[2].options[0].name, "Resina");
    }

    #[test]
    fn test_import_rejects_malformed_payloads() {
        assert!(matches!(parse_import("{not json"), Err(CatalogError::ImportFormat(_))));
        assert!(matches!(parse_import(r#"{"nombre": "x"}"#), Err(CatalogError::ImportFormat(_))));
        assert!(matches!(
            parse_import(r#"[{"nombre": "ok"}, "oops"]"#),
            Err(CatalogError::ImportFormat(_))
        ));
        assert!(matches!(
            parse_import(r#"[{"nombre": "ok", "precio": "gratis"}]"#),
            Err(CatalogError::ImportFormat(_))
        ));
    }

    #[test]
    fn test_import_of_empty_array_is_empty() {
        assert!(parse_import("[]").unwrap().is_empty());
    }
}
