//! Data Cleaner Module
//! Full-table transforms that normalize Hours_Viewed and drop invalid rows.

use polars::prelude::*;
use thiserror::Error;

use super::{COL_HOURS, COL_TITLE};

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Row counts before and after cleaning. Dropped rows are not reported
/// individually.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct CleanReport {
    pub rows_before: usize,
    pub rows_after: usize,
}

impl CleanReport {
    pub fn rows_dropped(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }
}

/// Handles data cleaning operations.
pub struct DataCleaner;

impl DataCleaner {
    /// Clean the raw viewership table. In order:
    ///
    /// 1. Strip thousands separators from Hours_Viewed and parse as f64.
    /// 2. Drop rows with null Hours_Viewed.
    /// 3. Drop rows with Hours_Viewed <= 0.
    /// 4. Drop rows with null Title; coerce Title to string.
    /// 5. For duplicate Titles keep the row with the largest Hours_Viewed.
    ///
    /// A Hours_Viewed cell that is still non-numeric after separator
    /// stripping fails the whole run.
    pub fn clean(df: &DataFrame) -> Result<(DataFrame, CleanReport), CleanError> {
        let rows_before = df.height();

        let sorted = df
            .clone()
            .lazy()
            .with_column(
                col(COL_HOURS)
                    .cast(DataType::String)
                    .str()
                    .replace_all(lit(","), lit(""), true)
                    .strict_cast(DataType::Float64)
                    .alias(COL_HOURS),
            )
            .filter(col(COL_HOURS).is_not_null())
            .filter(col(COL_HOURS).gt(lit(0.0)))
            .filter(col(COL_TITLE).is_not_null())
            .with_column(col(COL_TITLE).cast(DataType::String))
            .sort(
                [COL_HOURS],
                SortMultipleOptions::default().with_order_descending(true),
            )
            .collect()?;

        // Descending sort above makes "keep first" keep the largest value.
        let cleaned = sorted.unique_stable(
            Some(&[COL_TITLE.to_string()]),
            UniqueKeepStrategy::First,
            None,
        )?;

        let report = CleanReport {
            rows_before,
            rows_after: cleaned.height(),
        };
        Ok((cleaned, report))
    }
}
