//! CLI error type.

use aiyagari_solver::error::{ConfigError, HouseholdError, SolveError};
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Malformed configuration file
    #[error("Failed to parse {path}: {source}")]
    Parse {
        /// File being parsed
        path: String,
        /// Underlying TOML error
        source: toml::de::Error,
    },

    /// Environment override with an unparseable value
    #[error("Invalid value for {var}: '{value}'")]
    InvalidEnv {
        /// Variable name
        var: String,
        /// Offending value
        value: String,
    },

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration rejected by validation
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Solver failure
    #[error(transparent)]
    Solve(#[from] SolveError),

    /// Diagnostics failure
    #[error(transparent)]
    Household(#[from] HouseholdError),

    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialisation error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialisation error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
