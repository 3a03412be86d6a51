use serde::{Deserialize, Serialize};

/// Branding shown in the header and on printed quotes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub app_name: String,
    pub logo_url: Option<String>,
}

impl AppSettings {
    pub const DEFAULT_APP_NAME: &'static str = "Catálogo Dental";

    /// Window/document title for the given branding
    pub fn document_title(&self) -> String {
        format!("{} - Sistema de Tratamientos y Presupuestos", self.app_name)
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            app_name: Self::DEFAULT_APP_NAME.to_string(),
            logo_url: None,
        }
    }
}
