//! `petreg` command-line front end.
//!
//! # Responsibility
//! - Drive the pet service from the shell: add, edit, delete, list, search
//!   and filter.
//! - Validate shell input through the same form boundary a UI would use.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use petreg_core::{
    default_log_level, init_logging, AgeRange, Notifier, Pet, PetFilter, PetForm, PetId,
    PetRegistry, PetService, RegistryConfig, SqliteKeyValueStore, DEFAULT_STORAGE_KEY,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "petreg")]
#[command(about = "Manage a local registry of pets", long_about = None)]
#[command(version)]
struct Cli {
    /// SQLite database holding the registry
    #[arg(long, env = "PETREG_DB", default_value = "petreg.sqlite3")]
    db: PathBuf,

    /// Absolute directory for rolling log files (logging is off when unset)
    #[arg(long, env = "PETREG_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, env = "PETREG_LOG_LEVEL")]
    log_level: Option<String>,

    /// Storage key the pet snapshot lives under
    #[arg(long, env = "PETREG_STORAGE_KEY", default_value = DEFAULT_STORAGE_KEY)]
    storage_key: String,

    /// Print pets as a JSON array instead of rows
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new pet
    Add {
        #[command(flatten)]
        fields: PetFields,
        /// Use this id instead of generating one
        #[arg(long)]
        id: Option<PetId>,
    },

    /// Replace every field of an existing pet
    Edit {
        id: PetId,
        #[command(flatten)]
        fields: PetFields,
    },

    /// Delete a pet by id
    Delete { id: PetId },

    /// List all pets in insertion order
    List,

    /// List pets whose name contains the query (case-insensitive)
    Search { query: String },

    /// List pets matching name, age and description criteria
    Filter {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, default_value = "0")]
        min_age: String,
        #[arg(long, default_value = "100")]
        max_age: String,
        /// Only pets that have a description
        #[arg(long)]
        with_description: bool,
    },
}

#[derive(Args)]
struct PetFields {
    #[arg(long)]
    name: String,
    #[arg(long)]
    age: String,
    #[arg(long, default_value = "")]
    description: String,
    /// Photo URI; stored as an opaque reference
    #[arg(long)]
    photo: Option<String>,
}

impl PetFields {
    fn to_form(&self) -> PetForm {
        PetForm {
            name: self.name.clone(),
            age: self.age.clone(),
            description: self.description.clone(),
            photo: self.photo.clone(),
        }
    }
}

/// Shows alerts on stderr, where a UI would show a dialog.
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }
    info!(
        "event=cli_start module=cli status=ok version={}",
        petreg_core::core_version()
    );

    let config = RegistryConfig::with_storage_key(cli.storage_key.clone())?;
    let store = SqliteKeyValueStore::open(&cli.db)
        .with_context(|| format!("failed to open database `{}`", cli.db.display()))?;
    let registry = PetRegistry::open(Arc::new(store), config, Arc::new(StderrNotifier)).await;
    let mut service = PetService::new(registry);

    let outcome = run(&cli, &mut service);
    service.close().await;
    outcome
}

fn run(cli: &Cli, service: &mut PetService) -> Result<()> {
    match &cli.command {
        Commands::Add { fields, id } => {
            let new_id = match id {
                Some(id) => service.create_pet_with_id(id.clone(), &fields.to_form())?,
                None => service.create_pet(&fields.to_form())?,
            };
            println!("{new_id}");
        }
        Commands::Edit { id, fields } => {
            service.edit_pet(id, &fields.to_form())?;
        }
        Commands::Delete { id } => {
            let removed = service.remove_pet(id)?;
            println!("deleted {} ({})", removed.id, removed.name);
        }
        Commands::List => print_pets(service.pets().iter(), cli.json)?,
        Commands::Search { query } => print_pets(service.search(query), cli.json)?,
        Commands::Filter {
            query,
            min_age,
            max_age,
            with_description,
        } => {
            let filter = PetFilter {
                query: query.clone(),
                age_range: AgeRange::from_inputs(min_age, max_age),
                require_description: *with_description,
            };
            print_pets(service.visible_pets(&filter), cli.json)?;
        }
    }
    Ok(())
}

fn print_pets<'a>(pets: impl IntoIterator<Item = &'a Pet>, json: bool) -> Result<()> {
    let pets: Vec<&Pet> = pets.into_iter().collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&pets)?);
        return Ok(());
    }
    for pet in pets {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            pet.id,
            pet.name,
            pet.age,
            pet.description.as_deref().unwrap_or("-"),
            pet.photo.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}
