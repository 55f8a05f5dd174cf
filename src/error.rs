//! Error handling for transaction cleaning operations.
//!
//! Covers file access, source schema problems, value coercion failures
//! and configuration mistakes. Every variant carries enough context to
//! point the user at the offending file, column or values.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Source file {path} is missing required columns: {}", missing.join(", "))]
    MissingColumns { path: PathBuf, missing: Vec<String> },

    #[error(
        "Could not convert column '{column}' to {target}: {failures} row(s) failed, e.g. {}",
        samples.join(", ")
    )]
    CoercionFailed {
        column: String,
        target: String,
        failures: usize,
        samples: Vec<String>,
    },

    #[error(
        "Could not parse OrderDate: {failures} row(s) matched none of the configured formats, e.g. {}",
        samples.join(", ")
    )]
    DateParsing { failures: usize, samples: Vec<String> },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl EtlError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
