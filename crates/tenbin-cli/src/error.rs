//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file problem.
    #[error("Configuration error in {path}: {message}")]
    Config {
        /// Config file.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// Template file could not be read.
    #[error("Cannot read template {path}: {source}")]
    Template {
        /// Template file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
