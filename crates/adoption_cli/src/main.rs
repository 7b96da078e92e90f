//! Adoption CLI - Monte Carlo technology adoption scenarios
//!
//! # Commands
//!
//! - `adoption simulate` - Run the configured scenarios and export statistics
//! - `adoption scenarios` - Show the resolved multipliers of the configured scenarios
//! - `adoption check` - Validate the run configuration
//!
//! Configuration is read from `adoption.toml` (or `--config`) when present,
//! then overridden by `ADOPTION_*` environment variables and command-line
//! flags. Log output goes to stderr; `RUST_LOG` takes precedence over the
//! configured log level.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use config::RunConfig;

/// Technology adoption scenario simulator
#[derive(Parser)]
#[command(name = "adoption")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "adoption.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the configured scenarios
    Simulate {
        /// Number of Monte Carlo paths per scenario
        #[arg(short = 'n', long)]
        paths: Option<usize>,

        /// Number of simulated years
        #[arg(short = 't', long)]
        horizon: Option<usize>,

        /// Run seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format (json, csv, table)
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Include raw paths in the JSON export
        #[arg(long)]
        raw: bool,
    },

    /// Show the resolved multipliers of the configured scenarios
    Scenarios,

    /// Check the run configuration
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = RunConfig::load_or_default(&cli.config)?.with_env_override()?;

    let level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    info!(config = %cli.config.display(), "Run configuration loaded");

    match cli.command {
        Commands::Simulate {
            paths,
            horizon,
            seed,
            format,
            output,
            raw,
        } => {
            let options = commands::simulate::SimulateOptions {
                format: format.parse()?,
                output,
                raw,
            };
            commands::simulate::run(config.with_overrides(paths, horizon, seed), &options)
        }
        Commands::Scenarios => commands::scenarios::run(&config),
        Commands::Check => commands::check::run(&cli.config, &config),
    }
}
