mod generate;
mod inspect;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sql-seeder")]
#[command(version)]
#[command(about = "Generate randomized INSERT statements from CREATE TABLE schema files", long_about = None)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate INSERT statements for every schema file in a directory
    Generate {
        /// Directory containing schema files
        #[arg(default_value = "schema")]
        schema_dir: PathBuf,

        /// Output directory for the generated SQL file
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Number of records to generate per table [default: 5]
        #[arg(short, long, visible_alias = "num_records", value_parser = clap::value_parser!(u64).range(1..))]
        num_records: Option<u64>,

        /// File listing shared field names, comma-separated
        /// (default: <SCHEMA_DIR>/shared_fields.txt when present)
        #[arg(short, long)]
        shared_fields: Option<PathBuf>,

        /// Schema file extension [default: sql]
        #[arg(short, long)]
        extension: Option<String>,

        /// Random seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// YAML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print statements without writing the output file
        #[arg(long)]
        dry_run: bool,
    },

    /// Parse schema files and show the columns and types found
    Inspect {
        /// Directory containing schema files
        #[arg(default_value = "schema")]
        schema_dir: PathBuf,

        /// Schema file extension
        #[arg(short, long, default_value = "sql")]
        extension: String,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Install the stderr log subscriber
pub fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            schema_dir,
            output,
            num_records,
            shared_fields,
            extension,
            seed,
            config,
            dry_run,
        } => generate::run(
            schema_dir,
            output,
            num_records.map(|n| n as usize),
            shared_fields,
            extension,
            seed,
            config,
            dry_run,
        ),
        Commands::Inspect {
            schema_dir,
            extension,
            json,
        } => inspect::run(schema_dir, extension, json),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "sql-seeder", &mut io::stdout());
            Ok(())
        }
    }
}
