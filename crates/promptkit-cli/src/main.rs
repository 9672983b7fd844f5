//! PromptKit CLI - Fill prompt templates from the terminal
//!
//! Pick a template, answer its fields, and get the compiled prompt on the
//! clipboard.

mod clipboard;
mod config;
mod delivery;
mod drafts;
mod form;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use promptkit::{
    check_template, compile, select_all_text, validate, Catalog, DraftAutosaver, DraftStore,
    FieldSchema, FormValues, PromptTemplate, ValidationError,
};

use clipboard::{SystemClipboard, TerminalSelection};
use config::Config;
use delivery::deliver;
use drafts::FileDraftRepository;
use form::{coerce, parse_assignment, prompt_field};

const BUNDLED_CATALOG: &str = include_str!("../catalog/prompts.json");

type Autosaver = DraftAutosaver<FileDraftRepository>;

#[derive(Parser)]
#[command(name = "promptkit")]
#[command(about = "PromptKit CLI - Fill prompt templates and copy them", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List prompt templates
    List {
        /// Only templates with this tag
        #[arg(short, long)]
        tag: Option<String>,
        /// Search title, description and tags
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show a template's fields and placeholders
    Show {
        /// Template id
        id: String,
    },

    /// Check every template against its fields
    Check,

    /// Fill a template and copy the result to the clipboard
    Build {
        /// Template id
        id: String,
        /// Preset a field value (repeatable)
        #[arg(short, long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
        /// Do not prompt; use --set values and the saved draft only
        #[arg(long)]
        no_input: bool,
        /// Print the prompt instead of copying it
        #[arg(long)]
        no_copy: bool,
        /// Neither restore nor save a draft
        #[arg(long)]
        no_draft: bool,
    },

    /// Saved drafts
    Draft {
        #[command(subcommand)]
        action: DraftAction,
    },

    /// Show current configuration
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[derive(Subcommand)]
enum DraftAction {
    /// Show the saved draft for a template
    Show {
        /// Template id
        id: String,
    },
    /// Delete the saved draft for a template
    Clear {
        /// Template id
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    init_tracing(&config);

    match cli.command {
        Commands::List { tag, search } => cmd_list(&config, tag, search),
        Commands::Show { id } => cmd_show(&config, &id),
        Commands::Check => cmd_check(&config),
        Commands::Build { id, set, no_input, no_copy, no_draft } => {
            cmd_build(&config, &id, &set, !no_input, no_copy, no_draft).await
        }
        Commands::Draft { action } => cmd_draft(&config, action).await,
        Commands::Config { init } => cmd_config(&config, init),
    }
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_env("PROMPTKIT_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_catalog(config: &Config) -> Result<Catalog> {
    let catalog = match &config.catalog {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read catalog from {:?}", path))?;
            Catalog::from_json(&content)
                .with_context(|| format!("Failed to load catalog {:?}", path))?
        }
        None => Catalog::from_json(BUNDLED_CATALOG).context("Bundled catalog is invalid")?,
    };
    Ok(catalog)
}

fn draft_store(config: &Config) -> Result<Arc<DraftStore<FileDraftRepository>>> {
    let repo = Arc::new(FileDraftRepository::new(config.drafts_path()?));
    Ok(Arc::new(
        DraftStore::new(repo).with_freshness(config.draft_freshness()?),
    ))
}

// ============================================
// Command Implementations
// ============================================

fn cmd_list(config: &Config, tag: Option<String>, search: Option<String>) -> Result<()> {
    let catalog = load_catalog(config)?;

    let templates: Vec<&PromptTemplate> = catalog
        .search(search.as_deref().unwrap_or(""))
        .filter(|t| tag.as_deref().map_or(true, |tag| t.has_tag(tag)))
        .collect();

    if templates.is_empty() {
        println!("No prompts available.");
        return Ok(());
    }

    for template in templates {
        println!(
            "{} {} {}",
            template.icon,
            template.id.cyan(),
            template.title.bold()
        );
        if !template.description.is_empty() {
            println!("    {}", template.description);
        }
        if !template.tags.is_empty() {
            println!("    {}", format!("#{}", template.tags.join(" #")).dimmed());
        }
    }

    Ok(())
}

fn cmd_show(config: &Config, id: &str) -> Result<()> {
    let catalog = load_catalog(config)?;
    let template = catalog.get(id)?;

    println!("{} {}", template.icon, template.title.bold());
    if !template.description.is_empty() {
        println!("{}", template.description);
    }

    println!("\n{}", "Fields:".bold());
    for field in &template.fields {
        println!("  {}", describe_field(field));
    }

    println!("\n{}", "Template:".bold());
    for line in template.template.lines() {
        println!("  {}", line.dimmed());
    }

    let report = check_template(&template.template);
    println!(
        "\n{} {}",
        "Placeholders:".bold(),
        report.placeholders.join(", ")
    );

    Ok(())
}

fn describe_field(field: &FieldSchema) -> String {
    let mut parts = vec![format!("{} ({})", field.key.cyan(), field.kind)];
    if field.required {
        parts.push("required".red().to_string());
    }
    if let Some(min) = field.min {
        parts.push(format!("min {}", promptkit::format_number(min)));
    }
    if let Some(max) = field.max {
        parts.push(format!("max {}", promptkit::format_number(max)));
    }
    if let Some(pattern) = &field.pattern {
        parts.push(format!("pattern /{}/", pattern));
    }
    if let Some(options) = &field.options {
        parts.push(format!("[{}]", options.join(" | ")));
    }
    format!("{} - {}", parts.join(", "), field.label)
}

fn cmd_check(config: &Config) -> Result<()> {
    let catalog = load_catalog(config)?;
    let mut problems = 0;

    for template in catalog.templates() {
        let report = check_template(&template.template);
        let mismatch = report.against(&template.fields);

        if !report.is_valid() {
            println!("{} {}: no placeholders", "!".yellow(), template.id);
            problems += 1;
        }
        if !mismatch.unknown_placeholders.is_empty() {
            println!(
                "{} {}: placeholders without fields: {}",
                "✗".red(),
                template.id,
                mismatch.unknown_placeholders.join(", ")
            );
            problems += 1;
        }
        if !mismatch.unused_fields.is_empty() {
            println!(
                "{} {}: unused fields: {}",
                "!".yellow(),
                template.id,
                mismatch.unused_fields.join(", ")
            );
            problems += 1;
        }
        if !mismatch.padded_placeholders.is_empty() {
            println!(
                "{} {}: padded placeholders are never filled: {}",
                "✗".red(),
                template.id,
                mismatch.padded_placeholders.join(", ")
            );
            problems += 1;
        }
    }

    if problems == 0 {
        println!("{} {} templates consistent", "✓".green(), catalog.len());
    }

    Ok(())
}

async fn cmd_build(
    config: &Config,
    id: &str,
    sets: &[String],
    interactive: bool,
    no_copy: bool,
    no_draft: bool,
) -> Result<()> {
    let catalog = load_catalog(config)?;
    let template = catalog.get(id)?;

    let store = draft_store(config)?;
    let autosaver = (!no_draft)
        .then(|| DraftAutosaver::new(store.clone(), &template.id, Some(config.autosave_delay())));

    let mut values = FormValues::new();
    if !no_draft {
        if let Some(draft) = store.restore(&template.id).await {
            println!("{}", "Draft restored".dimmed());
            values = draft;
        }
    }

    for raw in sets {
        let (key, value) = parse_assignment(raw)?;
        let value = coerce(template.field(&key), &value);
        values.insert(key, value);
    }

    if interactive {
        println!("{} {}\n", template.icon, template.title.bold());
        for field in &template.fields {
            ask(field, &mut values, autosaver.as_ref())?;
        }
    }

    loop {
        let errors = validate(&template.fields, &values);
        if errors.is_empty() {
            break;
        }

        print_errors(&errors);
        if !interactive {
            if let Some(autosaver) = &autosaver {
                autosaver.flush(&values).await;
            }
            bail!("Please fix the errors above");
        }

        println!();
        for error in &errors {
            if let Some(field) = template.field(&error.field) {
                ask(field, &mut values, autosaver.as_ref())?;
            }
        }
    }

    let prompt = compile(&template.template, &values);

    if no_copy {
        if let Some(autosaver) = &autosaver {
            autosaver.discard().await;
        }
        println!("{}", prompt);
        return Ok(());
    }

    let result = deliver(&SystemClipboard::new(), &prompt, &values, autosaver.as_ref()).await;
    if result.ok {
        println!("\n{}", prompt.dimmed());
        println!("\n{} Prompt copied to clipboard!", "✓".green());
    } else {
        let message = result
            .error
            .unwrap_or_else(|| "Failed to copy to clipboard".to_string());
        println!("\n{} {}", "!".yellow(), message.yellow());
        select_all_text(&TerminalSelection, prompt.as_str());
    }

    Ok(())
}

/// Prompt for a field and schedule an autosave of the new values
fn ask(field: &FieldSchema, values: &mut FormValues, autosaver: Option<&Autosaver>) -> Result<()> {
    match prompt_field(field, values.get(&field.key))? {
        Some(value) => values.insert(field.key.clone(), value),
        None => values.remove(&field.key),
    };

    if let Some(autosaver) = autosaver {
        autosaver.schedule(values.clone());
    }
    Ok(())
}

fn print_errors(errors: &[ValidationError]) {
    println!("{}", "Please fix the errors below:".red().bold());
    for error in errors {
        println!("  {} {}", "✗".red(), error.message);
    }
}

async fn cmd_draft(config: &Config, action: DraftAction) -> Result<()> {
    let store = draft_store(config)?;

    match action {
        DraftAction::Show { id } => match store.restore(&id).await {
            Some(values) => {
                let json = serde_json::to_string_pretty(&values)
                    .context("Failed to serialize draft")?;
                println!("{}", json);
            }
            None => println!("No draft saved for '{}'", id),
        },
        DraftAction::Clear { id } => {
            store.clear(&id).await;
            println!("{} Draft for '{}' cleared", "✓".green(), id);
        }
    }

    Ok(())
}

fn cmd_config(config: &Config, init: bool) -> Result<()> {
    let path = Config::config_path()?;

    if init {
        if path.exists() {
            println!("Config already exists at {:?}", path);
        } else {
            config.save()?;
            println!("{} Config written to {:?}", "✓".green(), path);
        }
    }

    println!("{}", "Configuration:".bold());
    println!("  Config file: {:?}", path);
    match &config.catalog {
        Some(catalog) => println!("  Catalog: {:?}", catalog),
        None => println!("  Catalog: {}", "(bundled)".dimmed()),
    }
    println!("  Drafts: {:?}", config.drafts_path()?);
    println!("  Draft freshness: {}h", config.draft_freshness_hours);
    println!("  Autosave delay: {}ms", config.autosave_debounce_ms);
    println!("  Log level: {}", config.log_level);

    Ok(())
}
