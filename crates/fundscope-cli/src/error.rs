//! CLI error types.

use std::path::PathBuf;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Invalid decimal number.
    #[error("Invalid number: '{0}'")]
    InvalidNumber(String),

    /// A positions file lacks a column every record needs.
    #[error("{path}: missing required column '{column}'")]
    MissingColumn {
        /// File being read.
        path: PathBuf,
        /// Column name.
        column: String,
    },

    /// A row of a positions file could not be read.
    #[error("{path}, line {line}: {reason}")]
    InvalidRow {
        /// File being read.
        path: PathBuf,
        /// 1-based line number.
        line: u64,
        /// What is wrong with the row.
        reason: String,
    },

    /// Invalid command argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
