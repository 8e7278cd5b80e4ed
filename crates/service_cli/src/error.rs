//! CLI error types

use numkit_core::problem::ProblemError;
use numkit_core::types::SolverError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `numkit` commands
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Problem(#[from] ProblemError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialisation error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
