//! # vmod CLI entry point
//!
//! Parses command-line arguments, loads the optional configuration file
//! and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vmod_cli::config::Config;
use vmod_cli::schemas::{run_schemas, SchemasArgs};
use vmod_cli::validate::{run_validate, ValidateArgs};

/// Validate documents against vmod schemas and print the generated model.
#[derive(Parser, Debug)]
#[command(name = "vmod", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a JSON or YAML document and print the generated model.
    Validate(ValidateArgs),

    /// List the schemas available to `validate`.
    Schemas(SchemasArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(2);
        }
    };

    tracing::debug!(
        max_depth = config.max_depth,
        catalog = config.schemas.len(),
        "configuration loaded"
    );

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, &config),
        Commands::Schemas(args) => run_schemas(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
