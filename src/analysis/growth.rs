//! Growth Rate Module
//! Year-by-category pivot with period-over-period percent change.

use serde::Serialize;
use std::collections::BTreeMap;

use super::aggregate::YearPoint;

/// One pivoted year: per-category hours (missing combinations filled with
/// 0), the row total, and percent change against the previous year.
/// Growth is `None` for the first year (no prior period) and when the
/// previous value is 0 (no baseline).
#[derive(Debug, Clone, Serialize)]
pub struct GrowthRow {
    pub year: i32,
    pub hours: Vec<f64>,
    pub total: f64,
    pub growth_pct: Vec<Option<f64>>,
    pub total_growth_pct: Option<f64>,
}

/// Wide Year x category table with growth rates, built from the
/// year-series aggregation.
#[derive(Debug, Clone, Serialize)]
pub struct GrowthTable {
    pub categories: Vec<String>,
    pub rows: Vec<GrowthRow>,
}

fn pct_change(prev: f64, curr: f64) -> Option<f64> {
    (prev != 0.0).then(|| (curr - prev) / prev * 100.0)
}

impl GrowthTable {
    pub fn from_year_series(points: &[YearPoint]) -> Self {
        let mut categories: Vec<String> = Vec::new();
        let mut cells: BTreeMap<i32, BTreeMap<String, f64>> = BTreeMap::new();

        for point in points {
            if !categories.contains(&point.category) {
                categories.push(point.category.clone());
            }
            *cells
                .entry(point.year)
                .or_default()
                .entry(point.category.clone())
                .or_default() += point.hours;
        }
        categories.sort();

        let mut rows: Vec<GrowthRow> = Vec::with_capacity(cells.len());
        for (year, by_category) in cells {
            let hours: Vec<f64> = categories
                .iter()
                .map(|c| by_category.get(c).copied().unwrap_or(0.0))
                .collect();
            let total: f64 = hours.iter().sum();

            let (growth_pct, total_growth_pct) = match rows.last() {
                Some(prev) => (
                    prev.hours
                        .iter()
                        .zip(&hours)
                        .map(|(&p, &c)| pct_change(p, c))
                        .collect(),
                    pct_change(prev.total, total),
                ),
                None => (vec![None; categories.len()], None),
            };

            rows.push(GrowthRow {
                year,
                hours,
                total,
                growth_pct,
                total_growth_pct,
            });
        }

        GrowthTable { categories, rows }
    }
}
