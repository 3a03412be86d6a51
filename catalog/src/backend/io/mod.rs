//! # IO Module
//!
//! Turns catalog data into the outside-world formats the clinic exchanges:
//! JSON catalog files, printable HTML quotes and WhatsApp share links.
//! Nothing here touches the key-value store.

pub mod interchange;
pub mod print;
pub mod whatsapp;

pub use interchange::{export_file_name, export_treatments, parse_import};
pub use print::{print_file_name, render_print_html};
pub use whatsapp::{whatsapp_link, whatsapp_message};
