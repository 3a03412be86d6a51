//! Command-line interface definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "dental-catalog")]
#[command(version, about = "Dental clinic treatment catalog and quote tool")]
pub struct Cli {
    /// Directory holding the catalog data files
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// YAML config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse and edit the treatment catalog
    #[command(subcommand)]
    Treatments(TreatmentsCommand),
    /// Build a quote from catalog items without saving it, or save it
    #[command(subcommand)]
    Quote(QuoteCommand),
    /// Manage saved quotes
    #[command(subcommand)]
    Quotes(QuotesCommand),
    /// Show or change the display currency
    #[command(subcommand)]
    Currency(CurrencyCommand),
    /// Show or change the clinic branding
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// Export the catalog as JSON (to stdout unless --output is given)
    Export {
        /// File or directory to write to
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace the whole catalog with the contents of a JSON file
    Import {
        file: PathBuf,
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum TreatmentsCommand {
    List,
    Show {
        id: String,
    },
    Add {
        #[command(flatten)]
        fields: TreatmentFields,
        /// Option as NAME=PRICE, repeatable
        #[arg(long = "option", value_parser = parse_option_spec)]
        options: Vec<OptionSpec>,
        #[arg(short, long)]
        yes: bool,
    },
    Update {
        id: String,
        #[command(flatten)]
        fields: TreatmentFields,
        /// Option to add as NAME=PRICE, repeatable
        #[arg(long = "add-option", value_parser = parse_option_spec)]
        add_options: Vec<OptionSpec>,
        /// Id of an option to remove, repeatable
        #[arg(long = "remove-option")]
        remove_options: Vec<String>,
        #[arg(short, long)]
        yes: bool,
    },
    Remove {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
}

/// Treatment fields; on update only the given ones change
#[derive(Debug, Args)]
pub struct TreatmentFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Base price in PEN
    #[arg(long)]
    pub price: Option<f64>,
    #[arg(long)]
    pub image: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum QuoteCommand {
    /// Show the quote lines and running total
    Preview(QuoteArgs),
    /// Write a printable HTML page for the quote
    Print {
        #[command(flatten)]
        quote: QuoteArgs,
        /// File or directory to write to
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Save the quote
    Save(QuoteArgs),
}

#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Line as TREATMENT_ID or TREATMENT_ID/OPTION_ID, repeatable.
    /// Treatments with options need the OPTION_ID.
    #[arg(long = "item", required = true, value_parser = parse_item_spec)]
    pub items: Vec<ItemSpec>,
    #[arg(long, default_value = "")]
    pub client: String,
    #[arg(long, default_value = "")]
    pub phone: String,
}

#[derive(Debug, Subcommand)]
pub enum QuotesCommand {
    List,
    Remove {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
    Print {
        id: String,
        /// File or directory to write to
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print a WhatsApp link with the quote summary
    Whatsapp {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum CurrencyCommand {
    Show,
    /// PEN, USD or EUR
    Set { code: String },
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    Show,
    Set {
        #[arg(long)]
        name: Option<String>,
        /// Logo image URL; pass an empty string to remove it
        #[arg(long)]
        logo: Option<String>,
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemSpec {
    pub treatment_id: String,
    pub option_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    pub name: String,
    pub price: f64,
}

fn parse_item_spec(value: &str) -> Result<ItemSpec, String> {
    let (treatment_id, option_id) = match value.split_once('/') {
        Some((treatment, option)) => (treatment, Some(option)),
        None => (value, None),
    };
    if treatment_id.trim().is_empty() {
        return Err("treatment id is empty".to_string());
    }
    Ok(ItemSpec {
        treatment_id: treatment_id.trim().to_string(),
        option_id: option_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string),
    })
}

fn parse_option_spec(value: &str) -> Result<OptionSpec, String> {
    let (name, price) = value
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=PRICE, got '{}'", value))?;
    let price = price
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid price '{}'", price))?;
    Ok(OptionSpec {
        name: name.trim().to_string(),
        price,
    })
}
