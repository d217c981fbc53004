//! Run Summary Report
//! JSON summary of a pipeline run: row counts, aggregation results and
//! growth tables.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::analysis::{AggRow, GrowthTable};
use crate::data::CleanReport;

#[derive(Serialize)]
pub struct AggregationSummary {
    pub name: String,
    pub rows: Vec<AggRow>,
}

#[derive(Serialize)]
pub struct RunSummary {
    pub input: String,
    pub generated_at: String,
    pub cleaning: CleanReport,
    pub aggregations: Vec<AggregationSummary>,
    pub content_type_growth: GrowthTable,
    pub language_growth: GrowthTable,
}

pub fn write_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), summary)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
