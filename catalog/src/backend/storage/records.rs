//! Conversion between the persisted `shared` records and the domain models.

use chrono::{DateTime, Utc};
use log::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{QuoteLineItemRecord, QuoteRecord, TreatmentOptionRecord, TreatmentRecord};

use crate::backend::domain::models::quote::{Quote, QuoteLineItem};
use crate::backend::domain::models::treatment::{Treatment, TreatmentOption};

/// Parse a stored collection, degrading instead of failing.
///
/// A value that is not a JSON array counts as empty. Elements that do not
/// parse are skipped so one bad record does not hide the rest.
pub fn parse_collection<T: DeserializeOwned>(key: &str, raw: &str) -> Vec<T> {
    let values = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(values)) => values,
        Ok(_) => {
            warn!("Stored value under '{}' is not an array, treating it as empty", key);
            return Vec::new();
        }
        Err(e) => {
            warn!("Stored value under '{}' is not valid JSON ({}), treating it as empty", key, e);
            return Vec::new();
        }
    };

    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<T>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Failed to parse record {} under '{}': {}. Skipping.", index, key, e);
                None
            }
        })
        .collect()
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

pub fn treatment_to_record(treatment: &Treatment) -> TreatmentRecord {
    TreatmentRecord {
        id: treatment.id.clone(),
        nombre: treatment.name.clone(),
        descripcion: treatment.description.clone().unwrap_or_default(),
        precio: treatment.base_price,
        imagen: treatment.image_url.clone().unwrap_or_default(),
        subcategorias: treatment.options.iter().map(option_to_record).collect(),
    }
}

pub fn treatment_from_record(record: TreatmentRecord) -> Treatment {
    Treatment {
        id: record.id,
        name: record.nombre,
        description: non_blank(record.descripcion),
        base_price: record.precio,
        image_url: non_blank(record.imagen),
        options: record.subcategorias.into_iter().map(option_from_record).collect(),
    }
}

fn option_to_record(option: &TreatmentOption) -> TreatmentOptionRecord {
    TreatmentOptionRecord {
        id: option.id.clone(),
        nombre: option.name.clone(),
        precio: option.price,
        descripcion: option.description.clone().unwrap_or_default(),
        imagen: option.image_url.clone().unwrap_or_default(),
    }
}

fn option_from_record(record: TreatmentOptionRecord) -> TreatmentOption {
    TreatmentOption {
        id: record.id,
        name: record.nombre,
        price: record.precio,
        description: non_blank(record.descripcion),
        image_url: non_blank(record.imagen),
    }
}

pub fn quote_to_record(quote: &Quote) -> QuoteRecord {
    QuoteRecord {
        id: quote.id.clone(),
        client_name: quote.client_name.clone(),
        client_phone: quote.client_phone.clone().unwrap_or_default(),
        items: quote.items.iter().map(line_item_to_record).collect(),
        total: quote.total,
        date: quote.created_at.to_rfc3339(),
    }
}

pub fn quote_from_record(record: QuoteRecord) -> anyhow::Result<Quote> {
    let created_at = DateTime::parse_from_rfc3339(&record.date)
        .map_err(|e| anyhow::anyhow!("Invalid quote date '{}': {}", record.date, e))?
        .with_timezone(&Utc);

    Ok(Quote {
        id: record.id,
        client_name: record.client_name,
        client_phone: non_blank(record.client_phone),
        items: record.items.into_iter().map(line_item_from_record).collect(),
        total: record.total,
        created_at,
    })
}

fn line_item_to_record(item: &QuoteLineItem) -> QuoteLineItemRecord {
    QuoteLineItemRecord {
        treatment_id: item.treatment_id.clone(),
        treatment_name: item.treatment_name.clone(),
        subcategory_id: item.option_id.clone(),
        subcategory_name: item.option_name.clone(),
        price: item.price,
    }
}

fn line_item_from_record(record: QuoteLineItemRecord) -> QuoteLineItem {
    QuoteLineItem {
        treatment_id: record.treatment_id,
        treatment_name: record.treatment_name,
        option_id: record.subcategory_id,
        option_name: record.subcategory_name.and_then(non_blank),
        price: record.price,
    }
}
