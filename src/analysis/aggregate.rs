//! Aggregation Module
//! Group-by-sum over Hours_Viewed with the "billions" display label.

use polars::prelude::*;
use serde::Serialize;
use thiserror::Error;

use super::calendar::COL_YEAR;
use crate::data::COL_HOURS;

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// One aggregated row: group key tuple, summed hours and its display label.
#[derive(Debug, Clone, Serialize)]
pub struct AggRow {
    pub keys: Vec<String>,
    pub hours: f64,
    pub label: String,
}

/// One (year, category) point for the growth/line-chart analyses.
#[derive(Debug, Clone, Serialize)]
pub struct YearPoint {
    pub year: i32,
    pub category: String,
    pub hours: f64,
}

/// Hours scaled to billions, two decimals, suffixed "B".
pub fn format_hours_label(hours: f64) -> String {
    format!("{:.2}B", hours / 1e9)
}

fn any_value_to_string(value: AnyValue) -> String {
    value.to_string().trim_matches('"').to_string()
}

/// Group by the given key columns, sum Hours_Viewed, sort descending by the
/// sum and attach the billions label.
pub fn group_sum(df: &DataFrame, keys: &[&str]) -> Result<Vec<AggRow>, AggregateError> {
    let key_exprs: Vec<Expr> = keys.iter().map(|k| col(*k)).collect();

    let out = df
        .clone()
        .lazy()
        .group_by(key_exprs)
        .agg([col(COL_HOURS).sum()])
        .sort(
            [COL_HOURS],
            SortMultipleOptions::default().with_order_descending(true),
        )
        .collect()?;

    let hours_ca = out.column(COL_HOURS)?.f64()?;
    let mut key_cols = Vec::with_capacity(keys.len());
    for key in keys {
        key_cols.push(out.column(key)?);
    }

    let mut rows = Vec::with_capacity(out.height());
    for i in 0..out.height() {
        let mut key_values = Vec::with_capacity(key_cols.len());
        for key_col in &key_cols {
            key_values.push(any_value_to_string(key_col.get(i)?));
        }
        let hours = hours_ca.get(i).unwrap_or(0.0);
        rows.push(AggRow {
            keys: key_values,
            hours,
            label: format_hours_label(hours),
        });
    }
    Ok(rows)
}

/// Group by Year and a category column, sum Hours_Viewed and return the
/// points sorted by year ascending (they feed line charts and growth
/// tables, not value-ranked bars).
pub fn year_series(df: &DataFrame, category: &str) -> Result<Vec<YearPoint>, AggregateError> {
    let out = df
        .clone()
        .lazy()
        .group_by([col(COL_YEAR), col(category)])
        .agg([col(COL_HOURS).sum()])
        .sort([COL_YEAR], SortMultipleOptions::default())
        .collect()?;

    let years = out.column(COL_YEAR)?.i32()?;
    let categories = out.column(category)?;
    let hours_ca = out.column(COL_HOURS)?.f64()?;

    let mut points = Vec::with_capacity(out.height());
    for i in 0..out.height() {
        points.push(YearPoint {
            year: years.get(i).unwrap_or(0),
            category: any_value_to_string(categories.get(i)?),
            hours: hours_ca.get(i).unwrap_or(0.0),
        });
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{COL_CONTENT_TYPE, COL_LANGUAGE};
    use polars::df;

    fn cleaned_sample() -> DataFrame {
        df!(
            "Title" => ["A", "B", "C", "D"],
            COL_HOURS => [2500.0, 500.0, 1200.0, 800.0],
            COL_CONTENT_TYPE => ["Movie", "Show", "Show", "Movie"],
            COL_LANGUAGE => ["English", "Korean", "English", "English"],
            COL_YEAR => [2020, 2021, 2021, 2020],
        )
        .unwrap()
    }

    #[test]
    fn sums_and_sorts_descending() {
        let rows = group_sum(&cleaned_sample(), &[COL_CONTENT_TYPE]).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].keys, vec!["Movie".to_string()]);
        assert_eq!(rows[0].hours, 3300.0);
        assert_eq!(rows[1].keys, vec!["Show".to_string()]);
        assert_eq!(rows[1].hours, 1700.0);
    }

    #[test]
    fn aggregation_conserves_total_hours() {
        let df = cleaned_sample();
        let total: f64 = df
            .column(COL_HOURS)
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .flatten()
            .sum();
        let agg_total: f64 = group_sum(&df, &[COL_CONTENT_TYPE])
            .unwrap()
            .iter()
            .map(|r| r.hours)
            .sum();
        assert_eq!(total, agg_total);
    }

    #[test]
    fn multi_key_aggregation() {
        let rows = group_sum(&cleaned_sample(), &[COL_CONTENT_TYPE, COL_LANGUAGE]).unwrap();
        let movie_english = rows
            .iter()
            .find(|r| r.keys == ["Movie", "English"])
            .unwrap();
        assert_eq!(movie_english.hours, 3300.0);
    }

    #[test]
    fn billions_label() {
        assert_eq!(format_hours_label(2_500_000_000.0), "2.50B");
        assert_eq!(format_hours_label(12_345_000_000.0), "12.35B");
        assert_eq!(format_hours_label(500.0), "0.00B");
    }

    #[test]
    fn year_series_sorted_ascending() {
        let points = year_series(&cleaned_sample(), COL_CONTENT_TYPE).unwrap();
        assert!(points.windows(2).all(|w| w[0].year <= w[1].year));
        let movie_2020 = points
            .iter()
            .find(|p| p.year == 2020 && p.category == "Movie")
            .unwrap();
        assert_eq!(movie_2020.hours, 3300.0);
    }

    #[test]
    fn worked_example() {
        // Cleaned form of the dataset: duplicate "A" already resolved to
        // 2500 by the cleaner.
        let df = df!(
            "Title" => ["A", "B"],
            COL_HOURS => [2500.0, 500.0],
            COL_CONTENT_TYPE => ["Movie", "Show"],
        )
        .unwrap();
        let rows = group_sum(&df, &[COL_CONTENT_TYPE]).unwrap();
        assert_eq!(rows[0].keys, vec!["Movie".to_string()]);
        assert_eq!(rows[0].hours, 2500.0);
        assert_eq!(rows[1].keys, vec!["Show".to_string()]);
        assert_eq!(rows[1].hours, 500.0);
    }
}
