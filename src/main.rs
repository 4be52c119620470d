use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trip_admin_core::{FileStore, Storage};

mod commands;
mod config;

use commands::{
    AuthCommand, CategoryCommand, ConfigCommand, ExportCommand, ImportCommand, InitCommand,
    ItineraryCommand,
};
use config::Config;

#[derive(Parser)]
#[command(name = "trip-admin")]
#[command(version)]
#[command(about = "Manage travel categories and itineraries", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed storage with the default catalog
    Init(InitCommand),

    /// Manage the admin session token
    Auth(AuthCommand),

    /// Manage categories
    Category(CategoryCommand),

    /// Manage itineraries
    Itinerary(ItineraryCommand),

    /// Export both collections as JSON
    Export(ExportCommand),

    /// Replace both collections from an exported JSON file
    Import(ImportCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trip_admin=warn,trip_admin_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.clone())?;

    let command = match cli.command {
        Some(command) => command,
        None => {
            println!("Use --help to see available commands");
            return Ok(());
        }
    };

    if let Commands::Config(cmd) = &command {
        return cmd.run(&config, cli.config);
    }

    let storage = open_storage(&config);

    match command {
        Commands::Init(cmd) => cmd.run(&storage, config.seed_policy.value)?,
        Commands::Auth(cmd) => cmd.run(&storage)?,
        command => {
            require_session(&storage, &config)?;
            storage.initialize(config.seed_policy.value)?;

            match command {
                Commands::Category(cmd) => cmd.run(&storage)?,
                Commands::Itinerary(cmd) => cmd.run(&storage)?,
                Commands::Export(cmd) => cmd.run(&storage)?,
                Commands::Import(cmd) => cmd.run(&storage)?,
                Commands::Init(_) | Commands::Auth(_) | Commands::Config(_) => {}
            }
        }
    }

    Ok(())
}

fn open_storage(config: &Config) -> Storage {
    let data_dir = &config.data_dir.value;
    tracing::debug!("Data directory: {}", data_dir.display());

    let storage = Storage::new(FileStore::new(data_dir.clone()));
    storage.subscribe_all(|event| {
        tracing::info!(
            sequence = event.sequence,
            collection = %event.kind(),
            items = event.payload.len(),
            "collection changed"
        );
    });
    storage
}

fn require_session(storage: &Storage, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    if config.require_token.value && !storage.session().token_present()? {
        return Err("Not logged in. Run `trip-admin auth login <TOKEN>` first.".into());
    }
    Ok(())
}
