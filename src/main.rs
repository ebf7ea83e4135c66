//! Ucdb CLI - loads the Unicode Character Database XML export into SQLite

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use ucdb::loader::{CommitPolicy, Loader};
use ucdb::loader::xml::UcdReader;
use ucdb::storage::UcdStore;
use ucdb::ui::LoadProgress;
use ucdb::config;

#[derive(Parser)]
#[command(name = "ucdb")]
#[command(version = "0.0.1")]
#[command(about = "Loads the Unicode Character Database XML export into a SQLite database")]
#[command(long_about = r#"
Ucdb builds the SQLite database the Uniquity app ships with:
  • UnicodeGroup      - one row per block
  • UnicodeCharacter  - one row per code point
  • UnicodeCharacterAlias - alternate names

Example usage:
  ucdb init
  ucdb load
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database file and its schema (idempotent)
    Init {
        /// Path of the database file to create
        database: Option<PathBuf>,
    },

    /// Stream the UCD XML export into an initialized database
    Load {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Path to the UCD grouped XML export
        #[arg(short, long)]
        xml: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let file_config = config::load_config(None)?.unwrap_or_default();

    match cli.command {
        Commands::Init { database } => {
            let database = config::resolve_path(
                database,
                file_config.database.as_deref(),
                config::default_database_path(),
            );

            println!("Using database file: {}", database.display());
            UcdStore::create(&database)?;
            println!("Database initialized successfully.");
        }

        Commands::Load { database, xml } => {
            let database = config::resolve_path(
                database,
                file_config.database.as_deref(),
                config::default_database_path(),
            );
            let xml = config::resolve_path(
                xml,
                file_config.xml.as_deref(),
                config::default_xml_path(),
            );

            // The store refuses to open (and to create) a database that
            // init has not produced yet.
            let mut store = UcdStore::open_existing(&database)?;
            let mut reader = UcdReader::open(&xml)?;

            tracing::info!("Loading {} into {}", xml.display(), database.display());

            let progress = LoadProgress::new();
            let stats = Loader::new(&mut store, CommitPolicy::default())
                .run(&mut reader, &progress)?;
            progress.finish();

            if stats.skipped > 0 {
                println!("Skipped {} malformed elements", stats.skipped);
            }
            println!("{}", store.stats()?);
            println!("Done.");
        }
    }

    Ok(())
}
