//! OrderDate parsing.
//!
//! Timestamps arrive as text in whatever layout the export tool used.
//! Each value is tried against the configured chrono formats in order and
//! the column is replaced by a microsecond datetime column.

use crate::constants::MAX_ERROR_SAMPLES;
use crate::constants::columns::ORDER_DATE;
use crate::error::{EtlError, Result};

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use tracing::debug;

/// Parse a single timestamp using the first format that matches
///
/// Date-only formats yield midnight.
pub fn parse_timestamp<S: AsRef<str>>(value: &str, formats: &[S]) -> Option<NaiveDateTime> {
    let value = value.trim();
    formats.iter().find_map(|format| {
        let format = format.as_ref();
        NaiveDateTime::parse_from_str(value, format).ok().or_else(|| {
            NaiveDate::parse_from_str(value, format)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
    })
}

/// Replace the textual `OrderDate` column with a datetime column
///
/// Null, empty and unparseable values all fail the stage.
pub fn parse_order_dates<S: AsRef<str>>(mut df: DataFrame, formats: &[S]) -> Result<DataFrame> {
    let (micros, failures, samples) = {
        let raw = df.column(ORDER_DATE)?.str()?;

        let mut micros: Vec<Option<i64>> = Vec::with_capacity(raw.len());
        let mut failures = 0usize;
        let mut samples = Vec::new();

        for value in raw.into_iter() {
            let parsed = value.and_then(|v| parse_timestamp(v, formats));
            match parsed {
                Some(timestamp) => micros.push(Some(timestamp.and_utc().timestamp_micros())),
                None => {
                    failures += 1;
                    if samples.len() < MAX_ERROR_SAMPLES {
                        samples.push(format!("{:?}", value.unwrap_or("")));
                    }
                    micros.push(None);
                }
            }
        }

        (micros, failures, samples)
    };

    if failures > 0 {
        return Err(EtlError::DateParsing { failures, samples });
    }

    let parsed = Int64Chunked::new(ORDER_DATE.into(), &micros)
        .into_datetime(TimeUnit::Microseconds, None)
        .into_series();

    df.with_column(parsed)?;
    debug!("Parsed {} order dates", df.height());
    Ok(df)
}
