//! CSV output for cleaned transaction tables
//!
//! Writes a single header row and no index column. Timestamps use the
//! configured layout so reruns produce byte-identical files.

use crate::error::Result;

use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writer for the cleaned CSV file
#[derive(Debug, Clone)]
pub struct CsvOutputWriter {
    output_path: PathBuf,
    datetime_format: String,
}

impl CsvOutputWriter {
    pub fn new(output_path: PathBuf, datetime_format: impl Into<String>) -> Self {
        Self {
            output_path,
            datetime_format: datetime_format.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Write the frame, creating parent directories as needed. Returns the row count.
    pub fn write(&self, df: &mut DataFrame) -> Result<usize> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = File::create(&self.output_path)?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .with_datetime_format(Some(self.datetime_format.clone()))
            .finish(df)?;

        debug!(
            "Wrote {} rows to {}",
            df.height(),
            self.output_path.display()
        );
        Ok(df.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("nested").join("out").join("clean.csv");

        let mut df = df!(
            "OrderID" => ["536365", "536366"],
            "Quantity" => [6i64, 2]
        )
        .unwrap();

        let writer = CsvOutputWriter::new(output.clone(), "%Y-%m-%d %H:%M:%S");
        let rows = writer.write(&mut df).unwrap();

        assert_eq!(rows, 2);
        let content = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["OrderID,Quantity", "536365,6", "536366,2"]);
    }

    #[test]
    fn test_datetime_layout() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("dates.csv");

        // 2010-12-01 08:26:00 UTC in microseconds
        let micros = Int64Chunked::new("OrderDate".into(), &[Some(1_291_191_960_000_000i64)])
            .into_datetime(TimeUnit::Microseconds, None)
            .into_series();
        let mut df = DataFrame::new(vec![micros.into()]).unwrap();

        CsvOutputWriter::new(output.clone(), "%Y-%m-%d %H:%M:%S")
            .write(&mut df)
            .unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content.lines().nth(1), Some("2010-12-01 08:26:00"));
    }
}
