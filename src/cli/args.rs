//! Command-line argument definitions for the transaction cleaner
//!
//! Running the binary without a subcommand cleans the default export
//! in the working directory, exactly as `clean` with no options does.

use crate::constants::{OUTPUT_DATETIME_FORMAT, OUTPUT_FILE_NAME};
use crate::error::{EtlError, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the e-commerce transaction cleaner
///
/// Cleans a raw transaction export and writes a tidy CSV ready for
/// dashboards and time-series aggregation.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ecommerce-cleaner",
    version,
    about = "Clean raw e-commerce transaction exports into a tidy CSV",
    long_about = "Loads a raw e-commerce transaction export, drops rows without a customer, \
                  returns, free items and duplicates, parses order dates, derives revenue and \
                  calendar fields and writes a twelve-column CSV ready for visualization. \
                  Without a subcommand the default files in the working directory are used."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Clean a transaction export (default command)
    Clean(CleanArgs),
    /// Check a cleaned file against the output guarantees
    Validate(ValidateArgs),
}

/// Arguments for the clean command
#[derive(Debug, Clone, Default, Parser)]
pub struct CleanArgs {
    /// Raw transaction export to read
    ///
    /// Defaults to datacamp_ecommerce.csv in the working directory.
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        help = "Raw transaction export to read"
    )]
    pub input_path: Option<PathBuf>,

    /// Destination for the cleaned CSV
    ///
    /// Defaults to cleaned_ecommerce_data.csv in the working directory.
    /// Parent directories are created as needed.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Destination for the cleaned CSV"
    )]
    pub output_path: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// TOML file with any of: input_path, output_path, date_formats,
    /// output_datetime_format, preview_rows, show_progress.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Number of rows shown in the final preview (0 disables it)
    #[arg(long = "preview-rows", value_name = "COUNT")]
    pub preview_rows: Option<usize>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the validate command
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// Cleaned file to check
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        default_value = OUTPUT_FILE_NAME,
        help = "Cleaned file to check"
    )]
    pub file: PathBuf,

    /// Layout OrderDate was written with (chrono syntax)
    #[arg(
        long = "datetime-format",
        value_name = "FORMAT",
        default_value = OUTPUT_DATETIME_FORMAT
    )]
    pub datetime_format: String,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only report failures
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// The command to run, falling back to `clean` with defaults
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Clean(CleanArgs::default()))
    }
}

impl Commands {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        let (quiet, verbose) = match self {
            Commands::Clean(args) => (args.quiet, args.verbose),
            Commands::Validate(args) => (args.quiet, args.verbose),
        };

        if quiet {
            "error"
        } else {
            match verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

impl CleanArgs {
    /// Validate the clean command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(EtlError::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if let Some(input_path) = &self.input_path {
            if input_path.is_dir() {
                return Err(EtlError::configuration(format!(
                    "Input path is a directory: {}",
                    input_path.display()
                )));
            }
        }

        if let Some(output_path) = &self.output_path {
            if output_path.is_dir() {
                return Err(EtlError::configuration(format!(
                    "Output path is a directory: {}",
                    output_path.display()
                )));
            }
        }

        Ok(())
    }

    /// Check if we should print stage messages and spinners
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}
