//! Core data structures for cleaning runs.
//!
//! Run statistics, run outcomes, the per-column summary printed after
//! loading and the report produced when checking a cleaned file.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Row accounting for a completed cleaning run
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningStats {
    pub rows_loaded: usize,
    pub missing_customer_removed: usize,
    pub invalid_quantity_or_price_removed: usize,
    pub duplicates_removed: usize,
    pub rows_written: usize,
    pub output_path: PathBuf,
    pub processing_time_ms: u128,
}

impl CleaningStats {
    /// Total rows dropped across all cleaning stages
    pub fn rows_removed(&self) -> usize {
        self.missing_customer_removed + self.invalid_quantity_or_price_removed + self.duplicates_removed
    }
}

/// How a cleaning run ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The cleaned file was written
    Completed(CleaningStats),
    /// The source file was absent; nothing was written
    SourceMissing { path: PathBuf },
}

impl RunOutcome {
    pub fn stats(&self) -> Option<&CleaningStats> {
        match self {
            RunOutcome::Completed(stats) => Some(stats),
            RunOutcome::SourceMissing { .. } => None,
        }
    }
}

/// Name, dtype and fill level of one loaded column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSummary {
    pub name: String,
    pub dtype: String,
    pub non_null: usize,
}

impl fmt::Display for ColumnSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<14} {:>10} non-null  {}", self.name, self.non_null, self.dtype)
    }
}

/// Result of checking a cleaned file against the output invariants
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub path: PathBuf,
    pub rows_checked: usize,
    pub violations: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_removed_sums_all_stages() {
        let stats = CleaningStats {
            rows_loaded: 20,
            missing_customer_removed: 4,
            invalid_quantity_or_price_removed: 3,
            duplicates_removed: 2,
            rows_written: 11,
            ..Default::default()
        };
        assert_eq!(stats.rows_removed(), 9);
        assert_eq!(stats.rows_loaded - stats.rows_removed(), stats.rows_written);
    }

    #[test]
    fn test_outcome_stats() {
        let missing = RunOutcome::SourceMissing {
            path: PathBuf::from("absent.csv"),
        };
        assert!(missing.stats().is_none());

        let done = RunOutcome::Completed(CleaningStats::default());
        assert!(done.stats().is_some());
    }

    #[test]
    fn test_column_summary_display() {
        let summary = ColumnSummary {
            name: "CustomerID".to_string(),
            dtype: "str".to_string(),
            non_null: 42,
        };
        let line = summary.to_string();
        assert!(line.starts_with("CustomerID"));
        assert!(line.contains("42 non-null"));
        assert!(line.ends_with("str"));
    }
}
