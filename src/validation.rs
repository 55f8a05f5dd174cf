//! Output validation for cleaned transaction files.
//!
//! Re-reads a cleaned CSV and checks the guarantees the pipeline makes:
//! exact header, integer customer ids, positive quantities and prices,
//! consistent revenue and calendar fields, and no duplicate rows.

use crate::constants::columns::{
    CUSTOMER_ID, ORDER_DATE, ORDER_MONTH, ORDER_YEAR, OUTPUT, QUANTITY, SALE_PRICE, UNIT_PRICE,
    YEAR_MONTH,
};
use crate::error::{EtlError, Result};
use crate::models::ValidationReport;

use chrono::{Datelike, NaiveDateTime};
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Violations reported individually before further ones are only counted
const MAX_REPORTED_VIOLATIONS: usize = 50;

/// Check a cleaned file against the output invariants
///
/// `datetime_format` is the layout `OrderDate` was written with.
pub fn validate_output(path: &Path, datetime_format: &str) -> Result<ValidationReport> {
    if !path.exists() {
        return Err(EtlError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    info!("Validating cleaned file {}", path.display());

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    let mut report = ValidationReport {
        path: path.to_path_buf(),
        rows_checked: df.height(),
        violations: Vec::new(),
    };

    let header: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    if header != OUTPUT {
        report.violations.push(format!(
            "Header mismatch: expected [{}], found [{}]",
            OUTPUT.join(","),
            header.join(",")
        ));
        return Ok(report);
    }

    let mut violations = Vec::new();

    let order_dates = string_column(&df, ORDER_DATE)?;
    let years = string_column(&df, ORDER_YEAR)?;
    let months = string_column(&df, ORDER_MONTH)?;
    let year_months = string_column(&df, YEAR_MONTH)?;
    let customers = string_column(&df, CUSTOMER_ID)?;
    let quantities = string_column(&df, QUANTITY)?;
    let prices = string_column(&df, UNIT_PRICE)?;
    let sale_prices = string_column(&df, SALE_PRICE)?;

    for idx in 0..df.height() {
        let line = idx + 2;

        if customers.get(idx).and_then(|v| v.parse::<i64>().ok()).is_none() {
            violations.push(format!("Line {}: CustomerID is not an integer", line));
        }

        let quantity = quantities.get(idx).and_then(|v| v.parse::<i64>().ok());
        match quantity {
            Some(q) if q > 0 => {}
            _ => violations.push(format!("Line {}: Quantity is not positive", line)),
        }

        let price = prices.get(idx).and_then(|v| v.parse::<f64>().ok());
        match price {
            Some(p) if p > 0.0 => {}
            _ => violations.push(format!("Line {}: UnitPrice is not positive", line)),
        }

        let sale_price = sale_prices.get(idx).and_then(|v| v.parse::<f64>().ok());
        if let (Some(q), Some(p)) = (quantity, price) {
            let expected = q as f64 * p;
            let matches =
                sale_price.is_some_and(|s| (s - expected).abs() <= 1e-9 * s.abs().max(1.0));
            if !matches {
                violations.push(format!(
                    "Line {}: SalePrice is not Quantity x UnitPrice",
                    line
                ));
            }
        }

        let timestamp = order_dates
            .get(idx)
            .and_then(|v| NaiveDateTime::parse_from_str(v, datetime_format).ok());
        let Some(timestamp) = timestamp else {
            violations.push(format!("Line {}: OrderDate is not a valid timestamp", line));
            continue;
        };

        let year = years.get(idx).and_then(|v| v.parse::<i32>().ok());
        let month = months.get(idx).and_then(|v| v.parse::<u32>().ok());
        if year != Some(timestamp.year()) || month != Some(timestamp.month()) {
            violations.push(format!(
                "Line {}: OrderYear/OrderMonth do not match OrderDate",
                line
            ));
        }

        let expected_key = format!("{:04}-{:02}", timestamp.year(), timestamp.month());
        if year_months.get(idx) != Some(expected_key.as_str()) {
            violations.push(format!(
                "Line {}: YearMonth should be {}",
                line, expected_key
            ));
        }
    }

    let height = df.height();
    let distinct = df
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?
        .height();
    if distinct < height {
        violations.push(format!("{} duplicate row(s) found", height - distinct));
    }

    if violations.len() > MAX_REPORTED_VIOLATIONS {
        let hidden = violations.len() - MAX_REPORTED_VIOLATIONS;
        violations.truncate(MAX_REPORTED_VIOLATIONS);
        violations.push(format!("... and {} more violation(s)", hidden));
    }

    debug!(
        "Validation of {} rows found {} violation(s)",
        report.rows_checked,
        violations.len()
    );
    report.violations = violations;
    Ok(report)
}

fn string_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked> {
    Ok(df.column(name)?.str()?)
}
