//! Built-in catalog seeded on first run.

use super::models::treatment::{TreatmentInput, TreatmentOption};

fn option(name: &str, price: f64, description: &str) -> TreatmentOption {
    TreatmentOption {
        id: TreatmentOption::generate_id(),
        name: name.to_string(),
        price,
        description: Some(description.to_string()),
        image_url: None,
    }
}

fn treatment(
    name: &str,
    description: &str,
    base_price: f64,
    image_url: &str,
    options: Vec<TreatmentOption>,
) -> TreatmentInput {
    TreatmentInput {
        name: name.to_string(),
        description: Some(description.to_string()),
        base_price,
        image_url: Some(image_url.to_string()),
        options,
    }
}

/// The five treatments a fresh installation starts with
pub fn default_treatments() -> Vec<TreatmentInput> {
    vec![
        treatment(
            "Ortodoncia",
            "Alineación dental con brackets",
            2500.0,
            "https://images.unsplash.com/photo-1588776814546-1ffcf47267a5?auto=format&fit=crop&w=800&q=80",
            vec![
                option("Brackets Metálicos", 2500.0, "Tratamiento clásico con brackets metálicos"),
                option("Brackets Autoligado", 3500.0, "Menos fricción, citas más espaciadas"),
                option("Alineadores Invisibles", 4500.0, "Placas transparentes removibles"),
            ],
        ),
        treatment(
            "Endodoncia",
            "Tratamiento de conducto",
            700.0,
            "https://images.unsplash.com/photo-1606811841689-23db3c34146f?auto=format&fit=crop&w=800&q=80",
            vec![
                option("Monoradicular", 600.0, "Pieza con una sola raíz"),
                option("Multiradicular", 1000.0, "Pieza con múltiples raíces"),
            ],
        ),
        treatment(
            "Limpieza Dental",
            "Profilaxis profesional",
            120.0,
            "https://images.unsplash.com/photo-1576091160399-112ba8d25d1d?auto=format&fit=crop&w=800&q=80",
            Vec::new(),
        ),
        treatment(
            "Implante Dental",
            "Reemplazo permanente",
            3200.0,
            "https://images.unsplash.com/photo-1606811841689-23db3c34146f?auto=format&fit=crop&w=800&q=80",
            vec![
                option("Implante Unitario", 3200.0, "Reemplazo de una sola pieza"),
                option("Implante + Corona", 4500.0, "Incluye corona definitiva"),
            ],
        ),
        treatment(
            "Blanqueamiento",
            "Aclara el color dental",
            600.0,
            "https://images.unsplash.com/photo-1607613674874-fa165c2c2844?auto=format&fit=crop&w=800&q=80",
            vec![
                option("En Consultorio", 600.0, "Aplicación en sillón dental"),
                option("Casero", 400.0, "Férulas y gel para casa"),
            ],
        ),
    ]
}
