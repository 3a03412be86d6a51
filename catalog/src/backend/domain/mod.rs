//! # Domain Module
//!
//! Business logic for the dental treatment catalog and client quotes.
//!
//! ## Module Organization
//!
//! - **catalog_service**: treatment editing (drafts, options, image URL check) and bulk import
//! - **quote_builder**: the transient quote being assembled in a session
//! - **quote_service**: saving and deleting frozen quotes
//! - **settings_service**: display currency and branding
//! - **view_models**: pre-formatted display data for every screen
//! - **currency**: fixed-rate conversion and price formatting
//! - **default_catalog**: the treatments a fresh installation starts with
//!
//! ## Business Rules
//!
//! - Prices are stored in PEN and converted only for display
//! - A treatment with options is priced only through its options
//! - Quote lines snapshot names and prices; saved quotes never change
//! - A quote needs at least one line to be saved or printed

pub mod catalog_service;
pub mod commands;
pub mod currency;
pub mod default_catalog;
pub mod errors;
pub mod models;
pub mod quote_builder;
pub mod quote_service;
pub mod settings_service;
pub mod view_models;

pub use catalog_service::{is_valid_image_url, CatalogService, TreatmentDraft};
pub use currency::{format_price, Currency};
pub use errors::{CatalogError, Result};
pub use quote_builder::QuoteBuilder;
pub use quote_service::QuoteService;
pub use settings_service::SettingsService;
pub use view_models::{DisplayConfig, DisplayService};
