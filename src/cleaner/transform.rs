//! Whole-table cleaning stages
//!
//! Each stage takes the frame by value and returns the transformed frame,
//! together with the number of rows it removed where that applies.

use crate::constants::columns::{
    CUSTOMER_ID, ORDER_DATE, ORDER_MONTH, ORDER_YEAR, OUTPUT, QUANTITY, SALE_PRICE, UNIT_PRICE,
    YEAR_MONTH,
};
use crate::constants::{COLUMN_RENAMES, MAX_ERROR_SAMPLES, YEAR_MONTH_FORMAT};
use crate::error::{EtlError, Result};

use polars::prelude::*;
use tracing::debug;

/// Cast `name` to `target`, failing with sample values if any non-null cell cannot be converted
pub fn coerce_column(mut df: DataFrame, name: &str, target: DataType) -> Result<DataFrame> {
    let raw = df.column(name)?.clone();
    let coerced = raw.cast(&target)?;

    let failed = &raw.is_not_null() & &coerced.is_null();
    let failures = (&failed).into_iter().filter(|f| *f == Some(true)).count();

    if failures > 0 {
        let samples = (&failed)
            .into_iter()
            .enumerate()
            .filter(|(_, f)| *f == Some(true))
            .take(MAX_ERROR_SAMPLES)
            .map(|(idx, _)| raw.get(idx).map(|value| value.to_string()))
            .collect::<PolarsResult<Vec<_>>>()?;

        return Err(EtlError::CoercionFailed {
            column: name.to_string(),
            target: target.to_string(),
            failures,
            samples,
        });
    }

    debug!("Coerced column '{}' to {}", name, target);
    df.with_column(coerced)?;
    Ok(df)
}

/// Rename source columns to their standardised names
pub fn rename_columns(mut df: DataFrame) -> Result<DataFrame> {
    for (from, to) in COLUMN_RENAMES {
        if from != to {
            df.rename(from, (*to).into())?;
        }
    }
    Ok(df)
}

/// Drop rows without a customer identity
pub fn drop_missing_customers(df: DataFrame) -> Result<(DataFrame, usize)> {
    let before = df.height();
    let df = df
        .lazy()
        .filter(col(CUSTOMER_ID).is_not_null())
        .collect()?;
    let removed = before - df.height();

    debug!("Dropped {} rows without {}", removed, CUSTOMER_ID);
    Ok((df, removed))
}

/// Convert `CustomerID` to an integer, accepting float-formatted ids such as `17850.0`
pub fn coerce_customer_ids(df: DataFrame) -> Result<DataFrame> {
    let df = coerce_column(df, CUSTOMER_ID, DataType::Float64)?;
    coerce_column(df, CUSTOMER_ID, DataType::Int64)
}

/// Keep only rows with a strictly positive quantity and unit price
pub fn filter_invalid_quantity_price(df: DataFrame) -> Result<(DataFrame, usize)> {
    let before = df.height();
    let df = df
        .lazy()
        .filter(
            col(QUANTITY)
                .gt(lit(0))
                .and(col(UNIT_PRICE).gt(lit(0.0))),
        )
        .collect()?;
    let removed = before - df.height();

    debug!("Dropped {} rows with non-positive quantity or price", removed);
    Ok((df, removed))
}

/// Remove exact full-row duplicates, keeping the first occurrence in input order
pub fn remove_duplicates(df: DataFrame) -> Result<(DataFrame, usize)> {
    let before = df.height();
    let df = df
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?;
    let removed = before - df.height();

    debug!("Removed {} duplicate rows", removed);
    Ok((df, removed))
}

/// Add `SalePrice`, `OrderYear`, `OrderMonth` and `YearMonth`
///
/// Expects `OrderDate` to already be a datetime column.
pub fn derive_fields(df: DataFrame) -> Result<DataFrame> {
    let df = df
        .lazy()
        .with_columns([
            (col(QUANTITY).cast(DataType::Float64) * col(UNIT_PRICE)).alias(SALE_PRICE),
            col(ORDER_DATE)
                .dt()
                .year()
                .cast(DataType::Int32)
                .alias(ORDER_YEAR),
            col(ORDER_DATE)
                .dt()
                .month()
                .cast(DataType::Int32)
                .alias(ORDER_MONTH),
            col(ORDER_DATE)
                .dt()
                .to_string(YEAR_MONTH_FORMAT)
                .alias(YEAR_MONTH),
        ])
        .collect()?;
    Ok(df)
}

/// Select the output columns in their fixed order, dropping everything else
pub fn project_output(df: DataFrame) -> Result<DataFrame> {
    Ok(df.select(OUTPUT.iter().copied())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        df!(
            "OrderID" => ["1", "2", "3", "3"],
            "CustomerID" => [Some("17850.0"), None, Some("13047"), Some("13047")],
            "Quantity" => [6i64, -3, 2, 2],
            "UnitPrice" => [3.39f64, 1.0, 0.0, 0.0]
        )
        .unwrap()
    }

    #[test]
    fn test_rename_columns() {
        let df = df!(
            "InvoiceNo" => ["536365"],
            "InvoiceDate" => ["2010-12-01 08:26"],
            "StockCode" => ["71053"],
            "Description" => ["WHITE METAL LANTERN"],
            "UnitPrice" => [3.39f64],
            "Country" => ["United Kingdom"]
        )
        .unwrap();

        let df = rename_columns(df).unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert_eq!(
            names,
            vec![
                "OrderID",
                "OrderDate",
                "ProductID",
                "ProductName",
                "UnitPrice",
                "Country"
            ]
        );
    }

    #[test]
    fn test_drop_missing_customers() {
        let (df, removed) = drop_missing_customers(sample_frame()).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(df.height(), 3);
        assert_eq!(df.column("CustomerID").unwrap().null_count(), 0);
    }

    #[test]
    fn test_coerce_customer_ids() {
        let (df, _) = drop_missing_customers(sample_frame()).unwrap();
        let df = coerce_customer_ids(df).unwrap();

        let ids = df.column("CustomerID").unwrap();
        assert_eq!(ids.dtype(), &DataType::Int64);
        let ids: Vec<Option<i64>> = ids.i64().unwrap().into_iter().collect();
        assert_eq!(ids, vec![Some(17850), Some(13047), Some(13047)]);
    }

    #[test]
    fn test_coerce_column_reports_samples() {
        let df = df!("CustomerID" => [Some("17850.0"), Some("abc"), None, Some("n/a")]).unwrap();

        match coerce_column(df, "CustomerID", DataType::Float64) {
            Err(EtlError::CoercionFailed {
                column,
                failures,
                samples,
                ..
            }) => {
                assert_eq!(column, "CustomerID");
                assert_eq!(failures, 2);
                assert_eq!(samples.len(), 2);
                assert!(samples[0].contains("abc"));
                assert!(samples[1].contains("n/a"));
            }
            other => panic!("Expected CoercionFailed error, got {:?}", other),
        }
    }

    #[test]
    fn test_filter_invalid_quantity_price() {
        let (df, removed) = filter_invalid_quantity_price(sample_frame()).unwrap();
        // Only the first row has both a positive quantity and price
        assert_eq!(removed, 3);
        assert_eq!(df.height(), 1);
    }

    #[test]
    fn test_remove_duplicates_keeps_first_occurrence() {
        let df = df!(
            "OrderID" => ["b", "a", "b", "c", "a"],
            "Quantity" => [1i64, 2, 1, 3, 2]
        )
        .unwrap();

        let (df, removed) = remove_duplicates(df).unwrap();
        assert_eq!(removed, 2);

        let order: Vec<Option<&str>> = df
            .column("OrderID")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(order, vec![Some("b"), Some("a"), Some("c")]);
    }

    #[test]
    fn test_remove_duplicates_requires_full_row_match() {
        let df = df!(
            "OrderID" => ["a", "a"],
            "Quantity" => [1i64, 2]
        )
        .unwrap();

        let (df, removed) = remove_duplicates(df).unwrap();
        assert_eq!(removed, 0);
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn test_project_output_rejects_missing_columns() {
        let df = df!("OrderID" => ["1"]).unwrap();
        assert!(project_output(df).is_err());
    }
}
