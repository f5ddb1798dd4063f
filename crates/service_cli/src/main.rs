//! Aiyagari CLI - stationary equilibrium of a heterogeneous-agent economy
//!
//! # Commands
//!
//! - `aiyagari solve` - Solve for the stationary equilibrium and report it
//! - `aiyagari schedule` - Tabulate capital demand and supply over rates
//! - `aiyagari check` - Validate the configuration and print the economy
//!
//! # Configuration
//!
//! Settings are resolved in order: built-in calibration, TOML file
//! (`--config`, or `aiyagari.toml` if present), `AIYAGARI_*` environment
//! variables, command-line flags.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

/// Aiyagari stationary equilibrium solver
#[derive(Parser)]
#[command(name = "aiyagari")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Distribution method (discrete, eigenvector, monte-carlo)
    #[arg(short, long, global = true)]
    method: Option<String>,

    /// Number of policy grid points
    #[arg(long, global = true)]
    grid_points: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve for the stationary equilibrium
    Solve {
        /// Output format (json, csv, table)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Directory for policy, density and Euler error tables
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Capital demand and supply over a range of interest rates
    Schedule {
        /// Number of rates between -0.01 and 1/beta - 1
        #[arg(short, long, default_value = "25")]
        points: usize,

        /// Output format (json, csv, table)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate the configuration and print the derived economy
    Check {
        /// Print the resolved configuration as TOML
        #[arg(long)]
        show_config: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialise tracing; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let mut economy_config = config::load(cli.config.as_deref()).context("loading configuration")?;
    economy_config = config::with_env_override(economy_config).context("applying AIYAGARI_* overrides")?;
    if let Some(method) = &cli.method {
        economy_config.distribution.method = method.parse().map_err(CliError::from)?;
    }
    if let Some(points) = cli.grid_points {
        economy_config.grid.points = points;
    }

    match cli.command {
        Commands::Solve { format, output_dir } => {
            commands::solve::run(economy_config, format.parse()?, output_dir.as_deref())
                .context("solve failed")?
        }
        Commands::Schedule {
            points,
            format,
            output,
        } => commands::schedule::run(economy_config, points, format.parse()?, output.as_deref())
            .context("schedule failed")?,
        Commands::Check { show_config } => {
            commands::check::run(economy_config, show_config).context("configuration check failed")?
        }
    }

    Ok(())
}
