//! E-commerce Transaction Cleaner Library
//!
//! Turns a raw e-commerce transaction export into a tidy, analysis-ready
//! CSV in a single pass.
//!
//! This library provides tools for:
//! - Loading the raw export with a header check for required columns
//! - Renaming source columns to the analysis vocabulary
//! - Dropping rows without a customer, returns, free items and duplicates
//! - Parsing order timestamps from ISO and US export layouts
//! - Deriving revenue and calendar fields for time-series aggregation
//! - Writing the twelve-column cleaned file and validating it afterwards

pub mod cleaner;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod schema;
pub mod validation;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use cleaner::TransactionCleaner;
pub use config::CleanerConfig;
pub use error::{EtlError, Result};
pub use models::{CleaningStats, RunOutcome, ValidationReport};
pub use validation::validate_output;
