mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use formsmith::Config;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "formsmith")]
#[command(version, about = "formsmith CLI - form schemas with validation and derived fields", long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (default: ./formsmith.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a schema against form data: effective values and errors
    Evaluate {
        /// Schema JSON file, or the id of a saved schema
        schema: String,

        /// JSON object of field id to entered value
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Reference date for age formulas (YYYY-MM-DD, default: today)
        #[arg(long)]
        today: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Saved schema management
    Schemas {
        #[command(subcommand)]
        command: SchemaCommands,
    },

    /// List the available formulas for derived fields
    Formulas,

    /// Report structural problems in a schema
    Check {
        /// Schema JSON file, or the id of a saved schema
        schema: String,
    },
}

#[derive(Subcommand)]
enum SchemaCommands {
    /// List saved schemas
    List,

    /// Show one saved schema
    Show {
        id: String,

        /// Print the raw JSON
        #[arg(long)]
        json: bool,
    },

    /// Save a schema from a JSON file
    Import {
        file: PathBuf,

        /// Overwrite a saved schema with the same id
        #[arg(short, long)]
        replace: bool,
    },

    /// Delete a saved schema
    Delete { id: String },
}

fn init_tracing(verbose: u8, config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new(&config.logging.level),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli, config: Config) -> Result<ExitCode> {
    match cli.command {
        Commands::Evaluate {
            schema,
            data,
            today,
            json,
        } => commands::evaluate::execute(&config, &schema, data.as_deref(), today.as_deref(), json),
        Commands::Schemas { command } => commands::schemas::execute(&config, command),
        Commands::Formulas => commands::formulas::execute(),
        Commands::Check { schema } => commands::check::execute(&config, &schema),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path),
        None => Config::load_default(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(cli.verbose, &config);
    tracing::debug!(store = ?config.store.path, "configuration loaded");

    match run(cli, config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
