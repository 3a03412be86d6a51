use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use log::{debug, info};
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use dental_catalog::backend::domain::commands::quote::{DeleteQuoteCommand, SaveQuoteCommand};
use dental_catalog::backend::domain::commands::settings::UpdateSettingsCommand;
use dental_catalog::backend::domain::commands::treatment::DeleteTreatmentCommand;
use dental_catalog::backend::domain::{is_valid_image_url, Currency, QuoteBuilder, TreatmentDraft};
use dental_catalog::backend::io;
use dental_catalog::config::{AppConfig, DATA_DIR_ENV};
use dental_catalog::Backend;

mod cli;

use cli::{
    Cli, Command, CurrencyCommand, OptionSpec, QuoteArgs, QuoteCommand, QuotesCommand, SettingsCommand,
    TreatmentFields, TreatmentsCommand,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load_or_default(cli.config.as_deref())?;

    let level = if cli.verbose { "debug" } else { config.log_level.as_str() };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let data_directory = config.resolve_data_directory(
        cli.data_dir.clone(),
        std::env::var_os(DATA_DIR_ENV).map(PathBuf::from),
    )?;
    debug!("Resolved data directory {:?}", data_directory);

    let mut backend = Backend::open(&data_directory)?;
    run(&mut backend, cli.command)
}

fn run(backend: &mut Backend, command: Command) -> Result<()> {
    match command {
        Command::Treatments(command) => run_treatments(backend, command),
        Command::Quote(command) => run_quote(backend, command),
        Command::Quotes(command) => run_quotes(backend, command),
        Command::Currency(command) => run_currency(backend, command),
        Command::Settings(command) => run_settings(backend, command),
        Command::Export { output } => export(backend, output),
        Command::Import { file, yes } => import(backend, &file, yes),
    }
}

fn run_treatments(backend: &mut Backend, command: TreatmentsCommand) -> Result<()> {
    match command {
        TreatmentsCommand::List => {
            let cards = backend.display().treatment_cards(backend.catalog_service.list_treatments());
            for card in cards {
                match &card.formatted_price {
                    Some(price) => println!("{}  {}  {}", card.id, card.name, price),
                    None => println!("{}  {}", card.id, card.name),
                }
                for option in &card.options {
                    println!("    {}  {}  {}", option.id, option.name, option.formatted_price);
                }
            }
        }
        TreatmentsCommand::Show { id } => {
            let treatment = backend.catalog_service.get_treatment(&id)?;
            let card = backend.display().treatment_card(treatment);
            println!("{}", card.name);
            println!("  ID: {}", card.id);
            if !card.description.is_empty() {
                println!("  {}", card.description);
            }
            if let Some(price) = &card.formatted_price {
                println!("  Precio: {}", price);
            }
            if let Some(image) = &card.image_url {
                println!("  Imagen: {}", image);
            }
            if !card.options.is_empty() {
                println!("  Opciones:");
                for option in &card.options {
                    println!("    {}  {}  {}", option.id, option.name, option.formatted_price);
                    if let Some(description) = &option.description {
                        println!("      {}", description);
                    }
                }
            }
        }
        TreatmentsCommand::Add { fields, options, yes } => {
            let mut draft = TreatmentDraft::new();
            apply_fields(&mut draft, fields);
            add_options(&mut draft, &options)?;
            save_draft(backend, &draft, yes)?;
        }
        TreatmentsCommand::Update {
            id,
            fields,
            add_options: new_options,
            remove_options,
            yes,
        } => {
            let mut draft = backend.catalog_service.edit_treatment(&id)?;
            apply_fields(&mut draft, fields);
            for option_id in &remove_options {
                if draft.remove_option(option_id).is_none() {
                    anyhow::bail!("Treatment {} has no option {}", id, option_id);
                }
            }
            add_options(&mut draft, &new_options)?;
            save_draft(backend, &draft, yes)?;
        }
        TreatmentsCommand::Remove { id, yes } => {
            let name = backend.catalog_service.get_treatment(&id)?.name.clone();
            if !confirm(&format!("¿Eliminar el tratamiento '{}'?", name), yes)? {
                println!("Cancelado");
                return Ok(());
            }
            let result = backend
                .catalog_service
                .delete_treatment(DeleteTreatmentCommand { treatment_id: id })?;
            println!("✅ {}", result.success_message);
        }
    }
    Ok(())
}

fn apply_fields(draft: &mut TreatmentDraft, fields: TreatmentFields) {
    if let Some(name) = fields.name {
        draft.name = name;
    }
    if let Some(description) = fields.description {
        draft.description = description;
    }
    if let Some(price) = fields.price {
        draft.base_price = Some(price);
    }
    if let Some(image) = fields.image {
        draft.image_url = image;
    }
}

fn add_options(draft: &mut TreatmentDraft, options: &[OptionSpec]) -> Result<()> {
    for option in options {
        draft.add_option(&option.name, option.price, "", "")?;
    }
    Ok(())
}

fn save_draft(backend: &mut Backend, draft: &TreatmentDraft, yes: bool) -> Result<()> {
    let suspicious = draft.suspicious_image_urls();
    if !suspicious.is_empty() {
        let prompt = format!(
            "La URL de imagen parece inválida ({}). ¿Guardar de todos modos?",
            suspicious.join(", ")
        );
        if !confirm(&prompt, yes)? {
            println!("Cancelado");
            return Ok(());
        }
    }

    let result = backend.catalog_service.save_treatment(draft)?;
    println!("✅ {}: {} ({})", result.success_message, result.treatment.name, result.treatment.id);
    Ok(())
}

/// Build a throwaway quote from `--item` arguments
fn build_quote(backend: &Backend, args: &QuoteArgs) -> Result<QuoteBuilder> {
    let mut builder = QuoteBuilder::new();
    for item in &args.items {
        builder.add_item(
            backend.catalog_service.list_treatments(),
            &item.treatment_id,
            item.option_id.as_deref(),
        )?;
    }
    builder.set_client(&args.client, &args.phone);
    debug!("Built quote with {} items", builder.items().len());
    Ok(builder)
}

fn run_quote(backend: &mut Backend, command: QuoteCommand) -> Result<()> {
    match command {
        QuoteCommand::Preview(args) => {
            let builder = build_quote(backend, &args)?;
            let view = backend.display().working_quote(&builder);
            for (index, row) in view.rows.iter().enumerate() {
                println!("{:>2}. {}  {}  {}", index + 1, row.treatment_name, row.option_name, row.formatted_price);
            }
            println!("TOTAL: {}", view.formatted_total);
        }
        QuoteCommand::Print { quote, output } => {
            let builder = build_quote(backend, &quote)?;
            let preview = builder.preview()?;
            let settings = backend.settings_service.settings()?;
            let document = backend.display().print_document(&preview, &settings);
            let html = io::render_print_html(&document);
            write_output(output, &io::print_file_name(&document), &html)?;
        }
        QuoteCommand::Save(args) => {
            let mut builder = build_quote(backend, &args)?;
            let command = SaveQuoteCommand {
                client_name: args.client.clone(),
                client_phone: Some(args.phone.clone()),
            };
            let result = backend.quote_service.save_quote(&mut builder, command)?;
            println!(
                "✅ {}: {} ({})",
                result.success_message,
                result.quote.id,
                backend.settings_service.currency().format(result.quote.total)
            );
        }
    }
    Ok(())
}

fn run_quotes(backend: &mut Backend, command: QuotesCommand) -> Result<()> {
    match command {
        QuotesCommand::List => {
            let cards = backend.display().quote_cards(backend.quote_service.list_quotes());
            if cards.is_empty() {
                println!("No hay presupuestos guardados");
            }
            for card in cards {
                println!("{}  {}  {}", card.id, card.client_name, card.formatted_date);
                if let Some(phone) = &card.phone_line {
                    println!("  {}", phone);
                }
                for item in &card.items {
                    println!("  • {}: {}", item.label, item.formatted_price);
                }
                println!("  TOTAL: {}", card.formatted_total);
            }
        }
        QuotesCommand::Remove { id, yes } => {
            let client = backend.quote_service.get_quote(&id)?.client_name.clone();
            if !confirm(&format!("¿Eliminar el presupuesto de {}?", client), yes)? {
                println!("Cancelado");
                return Ok(());
            }
            let result = backend.quote_service.delete_quote(DeleteQuoteCommand { quote_id: id })?;
            println!("✅ {}", result.success_message);
        }
        QuotesCommand::Print { id, output } => {
            let quote = backend.quote_service.get_quote(&id)?;
            let settings = backend.settings_service.settings()?;
            let document = backend.display().print_document(quote, &settings);
            let html = io::render_print_html(&document);
            write_output(output, &io::print_file_name(&document), &html)?;
        }
        QuotesCommand::Whatsapp { id } => {
            let quote = backend.quote_service.get_quote(&id)?;
            println!("{}", io::whatsapp_link(quote, backend.settings_service.currency()));
        }
    }
    Ok(())
}

fn run_currency(backend: &mut Backend, command: CurrencyCommand) -> Result<()> {
    match command {
        CurrencyCommand::Show => {
            let currency = backend.settings_service.currency();
            println!("{} ({})", currency.code(), currency.symbol());
        }
        CurrencyCommand::Set { code } => {
            let currency: Currency = code.parse()?;
            let result = backend.settings_service.set_currency(currency)?;
            println!("✅ Moneda: {}", result.currency);
        }
    }
    Ok(())
}

fn run_settings(backend: &mut Backend, command: SettingsCommand) -> Result<()> {
    match command {
        SettingsCommand::Show => {
            let settings = backend.settings_service.settings()?;
            println!("Nombre: {}", settings.app_name);
            println!("Logo: {}", settings.logo_url.as_deref().unwrap_or("(ninguno)"));
            println!("Título: {}", settings.document_title());
        }
        SettingsCommand::Set { name, logo, yes } => {
            let current = backend.settings_service.settings()?;
            let command = UpdateSettingsCommand {
                app_name: name.unwrap_or(current.app_name),
                logo_url: logo.or(current.logo_url).unwrap_or_default(),
            };
            if !is_valid_image_url(command.logo_url.trim())
                && !confirm("La URL del logo parece inválida. ¿Guardar de todos modos?", yes)?
            {
                println!("Cancelado");
                return Ok(());
            }
            let result = backend.settings_service.update_settings(command)?;
            println!("✅ {}", result.success_message);
            println!("{}", result.settings.document_title());
        }
    }
    Ok(())
}

fn export(backend: &Backend, output: Option<PathBuf>) -> Result<()> {
    let json = io::export_treatments(backend.catalog_service.list_treatments())?;
    let file_name = io::export_file_name(Local::now().date_naive());
    write_output(output, &file_name, &json)
}

fn import(backend: &mut Backend, file: &Path, yes: bool) -> Result<()> {
    let content = fs::read_to_string(file).with_context(|| format!("Failed to read {:?}", file))?;
    let treatments = io::parse_import(&content)?;

    let prompt = format!(
        "Se reemplazarán todos los tratamientos por {} del archivo. ¿Continuar?",
        treatments.len()
    );
    if !confirm(&prompt, yes)? {
        println!("Cancelado");
        return Ok(());
    }

    let result = backend.catalog_service.import_treatments(treatments)?;
    println!("✅ {} ({})", result.success_message, result.imported_count);
    Ok(())
}

/// Write `content` to `output`, or to `default_name` inside it when it is a
/// directory. Without an output the content goes to stdout.
fn write_output(output: Option<PathBuf>, default_name: &str, content: &str) -> Result<()> {
    let Some(output) = output else {
        println!("{}", content);
        return Ok(());
    };
    let path = if output.is_dir() {
        output.join(default_name)
    } else {
        output
    };
    fs::write(&path, content).with_context(|| format!("Failed to write {:?}", path))?;
    println!("✅ Archivo guardado: {}", path.display());
    Ok(())
}

/// Ask a yes/no question on stdin; `assume_yes` skips the prompt
fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    print!("{} [s/N] ", prompt);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "s" | "si" | "sí" | "y" | "yes"))
}
