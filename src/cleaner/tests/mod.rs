//! Integration tests for the cleaning pipeline
//!
//! Exercise the complete run against small transaction exports written
//! to temporary directories.


use crate::config::CleanerConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const SOURCE_HEADER: &str =
    "InvoiceNo,StockCode,Description,Quantity,InvoiceDate,UnitPrice,CustomerID,Country";

pub const OUTPUT_HEADER: &str = "OrderID,OrderDate,OrderYear,OrderMonth,YearMonth,CustomerID,Country,ProductID,ProductName,Quantity,UnitPrice,SalePrice";

/// Write `rows` under the standard source header and return (input, output) paths
pub fn write_source(temp_dir: &TempDir, rows: &[&str]) -> (PathBuf, PathBuf) {
    write_source_with_header(temp_dir, SOURCE_HEADER, rows)
}

pub fn write_source_with_header(
    temp_dir: &TempDir,
    header: &str,
    rows: &[&str],
) -> (PathBuf, PathBuf) {
    let input_path = temp_dir.path().join("datacamp_ecommerce.csv");
    let output_path = temp_dir.path().join("cleaned_ecommerce_data.csv");

    let mut content = String::from(header);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    fs::write(&input_path, content).unwrap();

    (input_path, output_path)
}

/// Quiet configuration reading `input_path` and writing `output_path`
pub fn test_config(input_path: PathBuf, output_path: PathBuf) -> CleanerConfig {
    CleanerConfig::default()
        .with_input_path(input_path)
        .with_output_path(output_path)
        .quiet()
}

/// Output rows split into fields, header excluded
pub fn read_output_rows(output_path: &Path) -> Vec<Vec<String>> {
    fs::read_to_string(output_path)
        .unwrap()
        .lines()
        .skip(1)
        .map(|line| line.split(',').map(|s| s.to_string()).collect())
        .collect()
}
