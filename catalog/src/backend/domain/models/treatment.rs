//! Domain model for catalog treatments and their priced options.

use serde::{Deserialize, Serialize};

use super::generate_id;

/// A service offered by the clinic.
///
/// When `options` is non-empty the treatment is priced only through its
/// options and `base_price` is neither shown nor selectable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Treatment {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Price in the reference currency (PEN)
    pub base_price: f64,
    pub image_url: Option<String>,
    /// Display order is insertion order
    pub options: Vec<TreatmentOption>,
}

/// A priced variant of a treatment. Ids are unique within the parent only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentOption {
    pub id: String,
    pub name: String,
    /// Price in the reference currency (PEN)
    pub price: f64,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Treatment data without an id, as handed to the repository by the editor
/// or by a bulk import.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TreatmentInput {
    pub name: String,
    pub description: Option<String>,
    pub base_price: f64,
    pub image_url: Option<String>,
    pub options: Vec<TreatmentOption>,
}

impl Treatment {
    pub fn generate_id() -> String {
        generate_id("treatment")
    }

    /// Build a treatment from input under the given id
    pub fn from_input(id: String, input: TreatmentInput) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            base_price: input.base_price,
            image_url: input.image_url,
            options: input.options,
        }
    }

    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    pub fn find_option(&self, option_id: &str) -> Option<&TreatmentOption> {
        self.options.iter().find(|option| option.id == option_id)
    }

    /// Whether the base price is a visible, selectable price
    pub fn shows_base_price(&self) -> bool {
        !self.has_options() && self.base_price > 0.0
    }
}

impl TreatmentOption {
    pub fn generate_id() -> String {
        generate_id("option")
    }
}

impl From<Treatment> for TreatmentInput {
    fn from(treatment: Treatment) -> Self {
        Self {
            name: treatment.name,
            description: treatment.description,
            base_price: treatment.base_price,
            image_url: treatment.image_url,
            options: treatment.options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(id: &str, price: f64) -> TreatmentOption {
        TreatmentOption {
            id: id.to_string(),
            name: format!("Option {}", id),
            price,
            description: None,
            image_url: None,
        }
    }

    #[test]
    fn test_generated_ids_are_prefixed_and_distinct() {
        let a = Treatment::generate_id();
        let b = Treatment::generate_id();
        assert!(a.starts_with("treatment::"));
        assert!(TreatmentOption::generate_id().starts_with("option::"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_base_price_hidden_when_options_exist() {
        let mut treatment = Treatment::from_input(
            "treatment::1".to_string(),
            TreatmentInput {
                name: "Ortodoncia".to_string(),
                base_price: 2500.0,
                ..Default::default()
            },
        );
        assert!(treatment.shows_base_price());

        treatment.options.push(option("a", 3500.0));
        assert!(!treatment.shows_base_price());
        assert_eq!(treatment.find_option("a").map(|o| o.price), Some(3500.0));
        assert!(treatment.find_option("b").is_none());
    }

    #[test]
    fn test_zero_base_price_is_not_shown() {
        let treatment = Treatment::from_input("treatment::1".to_string(), TreatmentInput::default());
        assert!(!treatment.shows_base_price());
    }
}
