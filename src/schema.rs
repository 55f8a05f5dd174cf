//! Source schema inspection.
//!
//! Reads the header line of a transaction export to check that every
//! required column is present before the full table is loaded, and
//! summarises the columns of a loaded frame.

use crate::constants::source_columns;
use crate::error::{EtlError, Result};
use crate::models::ColumnSummary;
use polars::prelude::*;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read the column names from the header row of a CSV file
///
/// Uses the CSV reader itself, so quoted names containing commas are kept
/// whole. An empty file has no columns.
pub fn read_header(file_path: &Path) -> Result<Vec<String>> {
    if fs::metadata(file_path)?.len() == 0 {
        return Ok(Vec::new());
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_n_rows(Some(0))
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(file_path.to_path_buf()))?
        .finish()?;

    let names = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect::<Vec<_>>();

    debug!("Header of {}: {:?}", file_path.display(), names);
    Ok(names)
}

/// Required source columns absent from `header`, in canonical order
pub fn missing_required_columns(header: &[String]) -> Vec<String> {
    source_columns::REQUIRED
        .iter()
        .filter(|required| !header.iter().any(|name| name == *required))
        .map(|s| s.to_string())
        .collect()
}

/// Fail unless the file at `file_path` carries every required column
pub fn ensure_required_columns(file_path: &Path) -> Result<Vec<String>> {
    let header = read_header(file_path)?;
    let missing = missing_required_columns(&header);

    if !missing.is_empty() {
        return Err(EtlError::MissingColumns {
            path: file_path.to_path_buf(),
            missing,
        });
    }

    Ok(header)
}

/// Per-column dtype and non-null count of a frame
pub fn summarize_columns(df: &DataFrame) -> Vec<ColumnSummary> {
    df.get_columns()
        .iter()
        .map(|column| ColumnSummary {
            name: column.name().to_string(),
            dtype: column.dtype().to_string(),
            non_null: column.len() - column.null_count(),
        })
        .collect()
}
