//! Configuration management and validation.
//!
//! Provides the settings that drive a cleaning run: where to read and
//! write, which date layouts to accept and how much to print. Settings
//! are layered as defaults, then an optional TOML file, then CLI overrides.

use crate::constants::{
    DEFAULT_DATE_FORMATS, DEFAULT_PREVIEW_ROWS, OUTPUT_DATETIME_FORMAT, OUTPUT_FILE_NAME,
    SOURCE_FILE_NAME,
};
use crate::error::{EtlError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings for a transaction cleaning run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    /// Raw transaction export to read
    pub input_path: PathBuf,

    /// Destination of the cleaned CSV
    pub output_path: PathBuf,

    /// Accepted `OrderDate` layouts (chrono syntax), first match wins
    pub date_formats: Vec<String>,

    /// Layout used when writing `OrderDate`
    pub output_datetime_format: String,

    /// Number of rows printed in the final preview
    pub preview_rows: usize,

    /// Print stage messages, summaries and spinners
    pub show_progress: bool,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(SOURCE_FILE_NAME),
            output_path: PathBuf::from(OUTPUT_FILE_NAME),
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|s| s.to_string()).collect(),
            output_datetime_format: OUTPUT_DATETIME_FORMAT.to_string(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            show_progress: true,
        }
    }
}

impl CleanerConfig {
    /// Load configuration from a TOML file, filling gaps with defaults
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(EtlError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            EtlError::configuration(format!("Invalid config file {}: {}", path.display(), e))
        })?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Set the source file
    pub fn with_input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = path.into();
        self
    }

    /// Set the destination file
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Replace the accepted date layouts
    pub fn with_date_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.date_formats = formats.into_iter().map(Into::into).collect();
        self
    }

    /// Set the preview size
    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }

    /// Suppress console summaries and spinners
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Check settings for consistency
    pub fn validate(&self) -> Result<()> {
        if self.date_formats.is_empty() {
            return Err(EtlError::configuration(
                "At least one date format must be configured",
            ));
        }

        if self.date_formats.iter().any(|f| f.trim().is_empty()) {
            return Err(EtlError::configuration("Date formats must not be empty"));
        }

        if self.output_datetime_format.trim().is_empty() {
            return Err(EtlError::configuration(
                "Output datetime format must not be empty",
            ));
        }

        if self.input_path == self.output_path {
            return Err(EtlError::configuration(format!(
                "Input and output must be different files: {}",
                self.input_path.display()
            )));
        }

        Ok(())
    }
}
