//! Domain models for the treatment catalog and client quotes.

pub mod treatment;
pub mod quote;
pub mod settings;

use uuid::Uuid;

/// Generate a collision-resistant identifier with a type prefix,
/// e.g. `treatment::6f1c...`
pub fn generate_id(prefix: &str) -> String {
    format!("{}::{}", prefix, Uuid::new_v4())
}
