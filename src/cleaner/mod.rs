//! Transaction cleaning pipeline.
//!
//! Orchestrates the complete cleaning workflow for a raw e-commerce
//! export: load, rename, filter invalid rows, deduplicate, parse dates,
//! derive revenue and calendar fields, project the output columns and
//! write the cleaned CSV.

pub mod dates;
pub mod loader;
pub mod transform;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::writer::CsvOutputWriter;

use crate::config::CleanerConfig;
use crate::error::Result;
use crate::models::{CleaningStats, RunOutcome};
use crate::schema::{ensure_required_columns, summarize_columns};

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::DataFrame;
use std::fmt::Display;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Single-pass cleaner for e-commerce transaction exports
#[derive(Debug, Clone, Default)]
pub struct TransactionCleaner {
    config: CleanerConfig,
}

impl TransactionCleaner {
    /// Create a cleaner from validated configuration
    pub fn new(config: CleanerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    /// Main processing entry point
    ///
    /// A missing source file is reported and yields `RunOutcome::SourceMissing`
    /// without writing anything. All other failures are returned as errors.
    pub fn run(&self) -> Result<RunOutcome> {
        let start_time = Instant::now();
        let input_path = &self.config.input_path;

        if !input_path.exists() {
            warn!("Source file not found: {}", input_path.display());
            self.say(
                format!(
                    "Error: '{}' not found. Please place it in the same folder as the program.",
                    input_path.display()
                )
                .bright_red(),
            );
            return Ok(RunOutcome::SourceMissing {
                path: input_path.clone(),
            });
        }

        info!("Cleaning transactions from {}", input_path.display());
        ensure_required_columns(input_path)?;

        let spinner = self.spinner(format!("Loading {}...", input_path.display()));
        let df = loader::load_transactions(input_path)?;
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        let rows_loaded = df.height();
        self.say(
            format!(
                "Successfully loaded {} ({} rows).",
                input_path.display(),
                rows_loaded
            )
            .bright_green(),
        );

        let (mut cleaned, mut stats) = self.transform(df)?;
        stats.rows_loaded = rows_loaded;

        let writer = CsvOutputWriter::new(
            self.config.output_path.clone(),
            self.config.output_datetime_format.clone(),
        );
        let spinner = self.spinner(format!(
            "Writing {}...",
            writer.output_path().display()
        ));
        stats.rows_written = writer.write(&mut cleaned)?;
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        stats.output_path = self.config.output_path.clone();
        stats.processing_time_ms = start_time.elapsed().as_millis();

        self.report_completion(&cleaned, &stats);
        Ok(RunOutcome::Completed(stats))
    }

    /// Apply every in-memory stage to a loaded frame
    ///
    /// Expects source column names with `Quantity` and `UnitPrice` already
    /// numeric. Returns the projected output frame and per-stage row counts;
    /// `rows_loaded`, `rows_written` and the output fields are left for the caller.
    pub fn transform(&self, df: DataFrame) -> Result<(DataFrame, CleaningStats)> {
        let mut stats = CleaningStats::default();

        let df = transform::rename_columns(df)?;
        self.say("Columns have been renamed for consistency.");
        self.report_column_info(&df);

        let (df, removed) = transform::drop_missing_customers(df)?;
        stats.missing_customer_removed = removed;
        let df = transform::coerce_customer_ids(df)?;

        let (df, removed) = transform::filter_invalid_quantity_price(df)?;
        stats.invalid_quantity_or_price_removed = removed;
        self.say("\nMissing values and invalid records have been handled.");

        let (df, removed) = transform::remove_duplicates(df)?;
        stats.duplicates_removed = removed;
        if removed > 0 {
            self.say(format!("{} duplicate rows were removed.", removed));
        }

        let df = dates::parse_order_dates(df, &self.config.date_formats)?;
        self.say("\nData types have been corrected.");

        let df = transform::derive_fields(df)?;
        self.say("'SalePrice' column has been created.");
        self.say("New date-related columns (Year, Month) have been created.");

        let df = transform::project_output(df)?;
        debug!(
            "Transform complete: {} rows, {} columns",
            df.height(),
            df.width()
        );

        Ok((df, stats))
    }

    fn report_column_info(&self, df: &DataFrame) {
        if !self.config.show_progress {
            return;
        }

        println!("\n{}", "Initial data info:".bright_yellow());
        println!(
            "  {} {} rows x {} columns",
            "Shape:".bright_cyan(),
            df.height(),
            df.width()
        );
        for summary in summarize_columns(df) {
            println!("  {}", summary);
        }
    }

    fn report_completion(&self, cleaned: &DataFrame, stats: &CleaningStats) {
        if !self.config.show_progress {
            return;
        }

        let rule = "-------------------------------------------------";
        println!("\n{}", rule);
        println!(
            "{}",
            "Data cleaning and transformation complete."
                .bright_green()
                .bold()
        );
        println!(
            "The file '{}' is now ready for visualization.",
            stats.output_path.display()
        );
        println!("{}", rule);

        println!("\n{}", "Processing Summary".bright_green().bold());
        println!(
            "  {} {}",
            "Rows loaded:".bright_cyan(),
            stats.rows_loaded.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Missing CustomerID:".bright_cyan(),
            stats.missing_customer_removed.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Invalid quantity/price:".bright_cyan(),
            stats
                .invalid_quantity_or_price_removed
                .to_string()
                .bright_white()
        );
        println!(
            "  {} {}",
            "Duplicates:".bright_cyan(),
            stats.duplicates_removed.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Rows written:".bright_cyan(),
            stats.rows_written.to_string().bright_white().bold()
        );
        println!(
            "  {} {}ms",
            "Time elapsed:".bright_cyan(),
            stats.processing_time_ms.to_string().bright_white()
        );

        if self.config.preview_rows > 0 {
            println!("\n{}", "Preview of the final data:".bright_yellow());
            println!("{}", cleaned.head(Some(self.config.preview_rows)));
        }
    }

    fn say(&self, message: impl Display) {
        if self.config.show_progress {
            println!("{}", message);
        }
    }

    fn spinner(&self, message: String) -> Option<ProgressBar> {
        if !self.config.show_progress {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }
}
