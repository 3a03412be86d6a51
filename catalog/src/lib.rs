//! Treatment catalog and quoting tool for a dental clinic.
//!
//! The [`backend`] module holds the domain logic and the key-value storage it
//! persists to; [`config`] resolves where that storage lives.

pub mod backend;
pub mod config;

pub use backend::Backend;
