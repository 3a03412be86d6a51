use log::{info, warn};
use url::Url;

use crate::backend::domain::commands::treatment::{
    DeleteTreatmentCommand, DeleteTreatmentResult, ImportTreatmentsResult, SaveTreatmentResult,
};
use crate::backend::domain::errors::{CatalogError, Result};
use crate::backend::domain::models::treatment::{Treatment, TreatmentInput, TreatmentOption};
use crate::backend::storage::TreatmentRepository;

const IMAGE_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".webp", ".gif", ".svg"];

/// Loose check that `url` points at an image.
///
/// Empty is fine (no image). Anything else must be an absolute URL whose text
/// ends in a known image extension. A `false` here is only a warning.
pub fn is_valid_image_url(url: &str) -> bool {
    if url.is_empty() {
        return true;
    }
    if Url::parse(url).is_err() {
        return false;
    }
    let lowered = url.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lowered.ends_with(ext))
}

fn optional_text(value: &str) -> Option<String> {
    match value.trim() {
        "" => None,
        text => Some(text.to_string()),
    }
}

/// Editor state for creating or editing a treatment and its options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreatmentDraft {
    /// Set when editing an existing treatment
    pub editing_id: Option<String>,
    pub name: String,
    pub description: String,
    /// `None` when left blank, which saves as 0
    pub base_price: Option<f64>,
    pub image_url: String,
    options: Vec<TreatmentOption>,
}

impl TreatmentDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing `treatment`, copying its options
    pub fn from_treatment(treatment: &Treatment) -> Self {
        Self {
            editing_id: Some(treatment.id.clone()),
            name: treatment.name.clone(),
            description: treatment.description.clone().unwrap_or_default(),
            base_price: Some(treatment.base_price),
            image_url: treatment.image_url.clone().unwrap_or_default(),
            options: treatment.options.clone(),
        }
    }

    pub fn options(&self) -> &[TreatmentOption] {
        &self.options
    }

    /// Append an option. The name must be non-blank and the price positive.
    pub fn add_option(
        &mut self,
        name: &str,
        price: f64,
        description: &str,
        image_url: &str,
    ) -> Result<&TreatmentOption> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::validation("option name is required"));
        }
        if !price.is_finite() || price <= 0.0 {
            return Err(CatalogError::validation(format!(
                "option price must be greater than zero, got {}",
                price
            )));
        }

        let id = loop {
            let candidate = TreatmentOption::generate_id();
            if !self.options.iter().any(|o| o.id == candidate) {
                break candidate;
            }
        };
        self.options.push(TreatmentOption {
            id,
            name: name.to_string(),
            price,
            description: optional_text(description),
            image_url: optional_text(image_url),
        });
        Ok(&self.options[self.options.len() - 1])
    }

    /// Drop an option; `None` if the draft has no option with that id
    pub fn remove_option(&mut self, option_id: &str) -> Option<TreatmentOption> {
        let index = self.options.iter().position(|o| o.id == option_id)?;
        Some(self.options.remove(index))
    }

    /// Image URLs in the draft that do not look like images
    pub fn suspicious_image_urls(&self) -> Vec<String> {
        std::iter::once(self.image_url.trim())
            .chain(self.options.iter().filter_map(|o| o.image_url.as_deref()))
            .filter(|url| !is_valid_image_url(url))
            .map(str::to_string)
            .collect()
    }

    /// Validate the draft and turn it into repository input
    pub fn to_input(&self) -> Result<TreatmentInput> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CatalogError::validation("treatment name is required"));
        }
        let base_price = self.base_price.unwrap_or(0.0);
        if !base_price.is_finite() || base_price < 0.0 {
            return Err(CatalogError::validation(format!(
                "base price must be zero or more, got {}",
                base_price
            )));
        }

        Ok(TreatmentInput {
            name: name.to_string(),
            description: optional_text(&self.description),
            base_price,
            image_url: optional_text(&self.image_url),
            options: self.options.clone(),
        })
    }
}

/// Service for browsing and editing the treatment catalog
pub struct CatalogService {
    repository: TreatmentRepository,
}

impl CatalogService {
    pub fn new(repository: TreatmentRepository) -> Self {
        Self { repository }
    }

    pub fn list_treatments(&self) -> &[Treatment] {
        self.repository.load_all()
    }

    pub fn get_treatment(&self, treatment_id: &str) -> Result<&Treatment> {
        self.repository
            .get(treatment_id)
            .ok_or_else(|| CatalogError::TreatmentNotFound(treatment_id.to_string()))
    }

    /// Open an existing treatment in the editor
    pub fn edit_treatment(&self, treatment_id: &str) -> Result<TreatmentDraft> {
        Ok(TreatmentDraft::from_treatment(self.get_treatment(treatment_id)?))
    }

    /// Create or update a treatment from the editor state
    pub fn save_treatment(&mut self, draft: &TreatmentDraft) -> Result<SaveTreatmentResult> {
        let input = draft.to_input()?;
        let suspicious_image_urls = draft.suspicious_image_urls();
        for url in &suspicious_image_urls {
            warn!("Saving treatment '{}' with a suspicious image URL: {}", input.name, url);
        }

        let (treatment, created) = match &draft.editing_id {
            Some(id) => {
                info!("Updating treatment: {}", id);
                (self.repository.update(id, input)?, false)
            }
            None => {
                info!("Creating treatment: {}", input.name);
                (self.repository.add(input)?, true)
            }
        };

        let success_message = if created {
            "Tratamiento creado"
        } else {
            "Tratamiento actualizado"
        };

        Ok(SaveTreatmentResult {
            treatment,
            created,
            suspicious_image_urls,
            success_message: success_message.to_string(),
        })
    }

    pub fn delete_treatment(&mut self, command: DeleteTreatmentCommand) -> Result<DeleteTreatmentResult> {
        info!("Deleting treatment: {}", command.treatment_id);
        let treatment = self.repository.remove(&command.treatment_id)?;
        Ok(DeleteTreatmentResult {
            treatment,
            success_message: "Tratamiento eliminado".to_string(),
        })
    }

    /// Replace the whole catalog with imported treatments
    pub fn import_treatments(&mut self, treatments: Vec<TreatmentInput>) -> Result<ImportTreatmentsResult> {
        let imported_count = treatments.len();
        info!("Importing {} treatments", imported_count);
        self.repository.replace_all(treatments)?;
        Ok(ImportTreatmentsResult {
            imported_count,
            success_message: "Datos importados".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::test_utils::TestEnvironment;
    use crate::backend::storage::MemoryStore;
    use std::sync::Arc;

    fn setup_test() -> (CatalogService, TestEnvironment) {
        let env = TestEnvironment::new().unwrap();
        let repository = TreatmentRepository::load(env.store()).unwrap();
        (CatalogService::new(repository), env)
    }

    #[test]
    fn test_image_url_check() {
        assert!(is_valid_image_url(""));
        assert!(is_valid_image_url("https://example.com/photo.JPG"));
        assert!(is_valid_image_url("https://example.com/a/b/logo.svg"));
        assert!(!is_valid_image_url("https://example.com/page.html"));
        assert!(!is_valid_image_url("photo.png"));
        assert!(!is_valid_image_url("not a url"));
    }

    #[test]
    fn test_draft_add_and_remove_options() {
        let mut draft = TreatmentDraft::new();
        let id = draft.add_option(" Casero ", 400.0, "", "").unwrap().id.clone();
        draft.add_option("En Consultorio", 600.0, "Láser", "").unwrap();
        assert_eq!(draft.options().len(), 2);
        assert_eq!(draft.options()[0].name, "Casero");
        assert_eq!(draft.options()[0].description, None);
        assert_ne!(draft.options()[0].id, draft.options()[1].id);

        let removed = draft.remove_option(&id).unwrap();
        assert_eq!(removed.name, "Casero");
        assert!(draft.remove_option(&id).is_none());
        assert_eq!(draft.options().len(), 1);
    }

    #[test]
    fn test_draft_option_validation() {
        let mut draft = TreatmentDraft::new();
        assert!(matches!(draft.add_option("  ", 100.0, "", ""), Err(CatalogError::Validation(_))));
        assert!(matches!(draft.add_option("Casero", 0.0, "", ""), Err(CatalogError::Validation(_))));
        assert!(matches!(draft.add_option("Casero", f64::NAN, "", ""), Err(CatalogError::Validation(_))));
        assert!(draft.options().is_empty());
    }

    #[test]
    fn test_draft_to_input_validation() {
        let mut draft = TreatmentDraft::new();
        assert!(matches!(draft.to_input(), Err(CatalogError::Validation(_))));

        draft.name = " Limpieza ".to_string();
        let input = draft.to_input().unwrap();
        assert_eq!(input.name, "Limpieza");
        assert_eq!(input.base_price, 0.0);
        assert_eq!(input.description, None);

        draft.base_price = Some(-1.0);
        assert!(matches!(draft.to_input(), Err(CatalogError::Validation(_))));
        draft.base_price = Some(f64::INFINITY);
        assert!(matches!(draft.to_input(), Err(CatalogError::Validation(_))));
    }

    #[test]
    fn test_create_and_update_treatment() {
        let (mut service, _env) = setup_test();
        let before = service.list_treatments().len();

        let mut draft = TreatmentDraft::new();
        draft.name = "Carillas".to_string();
        draft.base_price = Some(900.0);
        draft.image_url = "https://example.com/carillas".to_string();

        let result = service.save_treatment(&draft).unwrap();
        assert!(result.created);
        assert_eq!(result.success_message, "Tratamiento creado");
        assert_eq!(result.suspicious_image_urls, vec!["https://example.com/carillas".to_string()]);
        assert_eq!(service.list_treatments().len(), before + 1);

        let mut draft = service.edit_treatment(&result.treatment.id).unwrap();
        draft.add_option("Porcelana", 1200.0, "", "").unwrap();
        let updated = service.save_treatment(&draft).unwrap();
        assert!(!updated.created);
        assert_eq!(updated.success_message, "Tratamiento actualizado");
        assert_eq!(updated.treatment.id, result.treatment.id);
        assert_eq!(service.get_treatment(&result.treatment.id).unwrap().options.len(), 1);
        assert_eq!(service.list_treatments().len(), before + 1);
    }

    #[test]
    fn test_invalid_draft_leaves_catalog_unchanged() {
        let (mut service, _env) = setup_test();
        let before = service.list_treatments().to_vec();

        let draft = TreatmentDraft::new();
        assert!(matches!(service.save_treatment(&draft), Err(CatalogError::Validation(_))));
        assert_eq!(service.list_treatments(), before.as_slice());
    }

    #[test]
    fn test_delete_treatment() {
        let (mut service, _env) = setup_test();
        let id = service.list_treatments()[0].id.clone();

        let result = service
            .delete_treatment(DeleteTreatmentCommand { treatment_id: id.clone() })
            .unwrap();
        assert_eq!(result.success_message, "Tratamiento eliminado");
        assert!(matches!(service.get_treatment(&id), Err(CatalogError::TreatmentNotFound(_))));

        let err = service
            .delete_treatment(DeleteTreatmentCommand { treatment_id: id })
            .unwrap_err();
        assert!(matches!(err, CatalogError::TreatmentNotFound(_)));
    }

    #[test]
    fn test_import_replaces_catalog() {
        let (mut service, _env) = setup_test();
        let inputs = vec![
            TreatmentInput {
                name: "Profilaxis".to_string(),
                base_price: 90.0,
                ..Default::default()
            },
            TreatmentInput {
                name: "Corona".to_string(),
                base_price: 800.0,
                ..Default::default()
            },
        ];

        let result = service.import_treatments(inputs).unwrap();
        assert_eq!(result.imported_count, 2);
        assert_eq!(result.success_message, "Datos importados");
        let names: Vec<&str> = service.list_treatments().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Profilaxis", "Corona"]);
    }

    #[test]
    fn test_failed_write_is_reported_and_not_applied() {
        let store = Arc::new(MemoryStore::with_quota(8 * 1024));
        let repository = TreatmentRepository::load(store).unwrap();
        let mut service = CatalogService::new(repository);
        let before = service.list_treatments().to_vec();

        let mut draft = TreatmentDraft::new();
        draft.name = "Carillas".to_string();
        draft.description = "x".repeat(16 * 1024);

        assert!(matches!(service.save_treatment(&draft), Err(CatalogError::Persistence(_))));
        assert_eq!(service.list_treatments(), before.as_slice());
    }
}
