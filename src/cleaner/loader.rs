//! Source loading for transaction exports
//!
//! Reads the whole export into memory with every column as text, turns
//! empty cells and NA markers into nulls, then coerces the numeric columns
//! the row filters depend on.

use super::transform::coerce_column;
use crate::constants::MISSING_VALUE_TOKENS;
use crate::constants::source_columns::{QUANTITY, UNIT_PRICE};
use crate::error::Result;

use polars::prelude::*;
use std::path::Path;
use tracing::debug;

/// Load a transaction export with `Quantity` as Int64 and `UnitPrice` as Float64
pub fn load_transactions(file_path: &Path) -> Result<DataFrame> {
    debug!("Reading transaction export: {}", file_path.display());

    // Zero-length inference keeps every column as String so that coercion
    // failures can be reported with the offending values.
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(file_path.to_path_buf()))?
        .finish()?;

    debug!(
        "Read {} rows x {} columns from {}",
        df.height(),
        df.width(),
        file_path.display()
    );

    let df = normalize_missing(df)?;
    let df = coerce_column(df, QUANTITY, DataType::Int64)?;
    coerce_column(df, UNIT_PRICE, DataType::Float64)
}

/// True for blank cells and NA markers such as `NaN`, `NA` or `NULL`
pub fn is_missing_token(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || MISSING_VALUE_TOKENS.contains(&value)
}

/// Replace missing-value cells in every text column with nulls
///
/// Quoted empty fields (`""`) load as empty strings rather than nulls, so
/// they are folded in here together with the NA markers.
pub fn normalize_missing(mut df: DataFrame) -> Result<DataFrame> {
    for name in df.get_column_names_owned() {
        let normalized = {
            let column = df.column(name.as_str())?;
            if column.dtype() != &DataType::String {
                continue;
            }
            let values = column.str()?;
            let before = values.null_count();

            let normalized: StringChunked = values
                .into_iter()
                .map(|value| value.filter(|v| !is_missing_token(v)))
                .collect();
            let added = normalized.null_count() - before;
            if added == 0 {
                continue;
            }

            debug!("Treated {} cell(s) in '{}' as missing", added, name);
            normalized.with_name(name.clone())
        };

        df.with_column(normalized.into_series())?;
    }

    Ok(df)
}
