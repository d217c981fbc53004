//! viewlens - Content Viewership CSV Analysis & Chart Generator
//!
//! Single-pass pipeline: load the viewership CSV, clean and deduplicate
//! it, derive calendar dimensions, compute the aggregation set, render
//! the charts as PNGs and write a JSON run summary.

mod analysis;
mod charts;
mod cli;
mod data;
mod report;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{debug, info};

use analysis::{
    day_display, group_sum, month_display, with_calendar_columns, year_series, GrowthTable,
    COL_DAY_OF_WEEK, COL_MONTH, COL_SEASON, COL_YEAR,
};
use charts::{BarChart, Chart, GroupedBarChart, LineChart};
use cli::Args;
use data::{DataCleaner, DataLoader, COL_CONTENT_TYPE, COL_LANGUAGE};
use report::{write_summary, AggregationSummary, RunSummary};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    run(args)
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(args: Args) -> Result<()> {
    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;

    let raw = DataLoader::load(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    info!(rows = raw.height(), "loaded {}", args.input.display());

    let (cleaned, clean_report) = DataCleaner::clean(&raw).context("cleaning failed")?;
    info!(
        before = clean_report.rows_before,
        after = clean_report.rows_after,
        dropped = clean_report.rows_dropped(),
        "cleaned dataset"
    );

    let table = with_calendar_columns(&cleaned).context("calendar derivation failed")?;

    // Category and calendar aggregations (value-descending)
    let content_type = group_sum(&table, &[COL_CONTENT_TYPE])?;
    let language = group_sum(&table, &[COL_LANGUAGE])?;
    let content_language = group_sum(&table, &[COL_CONTENT_TYPE, COL_LANGUAGE])?;
    let season = group_sum(&table, &[COL_SEASON])?;
    let month = group_sum(&table, &[COL_MONTH])?;
    let day_of_week = group_sum(&table, &[COL_DAY_OF_WEEK])?;
    let year_totals = group_sum(&table, &[COL_YEAR])?;

    // Year series (ascending) for the line charts and growth tables
    let year_content = year_series(&table, COL_CONTENT_TYPE)?;
    let year_language = year_series(&table, COL_LANGUAGE)?;

    let content_type_growth = GrowthTable::from_year_series(&year_content);
    let language_growth = GrowthTable::from_year_series(&year_language);
    log_growth("content type", &content_type_growth);
    log_growth("language", &language_growth);

    let figures: Vec<(&str, Chart)> = vec![
        (
            "content_type.png",
            Chart::Bar(BarChart::from_rows(
                "Total Hours Viewed by Content Type",
                "Content Type",
                &content_type,
                |k| k.to_string(),
            )),
        ),
        (
            "language.png",
            Chart::Bar(BarChart::from_rows(
                "Total Hours Viewed by Language",
                "Language",
                &language,
                |k| k.to_string(),
            )),
        ),
        (
            "content_type_by_language.png",
            Chart::GroupedBar(GroupedBarChart::from_rows(
                "Hours Viewed by Content Type and Language",
                "Content Type",
                &content_language,
            )),
        ),
        (
            "year_by_content_type.png",
            Chart::Line(LineChart::from_points(
                "Hours Viewed by Year and Content Type",
                "Year",
                &year_content,
            )),
        ),
        (
            "year_by_language.png",
            Chart::Line(LineChart::from_points(
                "Hours Viewed by Year and Language",
                "Year",
                &year_language,
            )),
        ),
        (
            "season.png",
            Chart::Bar(BarChart::from_rows(
                "Total Hours Viewed by Season",
                "Season",
                &season,
                |k| k.to_string(),
            )),
        ),
        (
            "month.png",
            Chart::Bar(BarChart::from_rows(
                "Total Hours Viewed by Month",
                "Month",
                &month,
                month_display,
            )),
        ),
        (
            "day_of_week.png",
            Chart::Bar(BarChart::from_rows(
                "Total Hours Viewed by Day of Week",
                "Day of Week",
                &day_of_week,
                day_display,
            )),
        ),
    ];

    let size = (args.width, args.height);
    figures
        .par_iter()
        .try_for_each(|(file, chart)| {
            let path: PathBuf = args.output.join(file);
            chart.render(&path, size)?;
            debug!("rendered '{}' to {}", chart.title(), path.display());
            Ok::<_, charts::ChartError>(())
        })
        .context("chart rendering failed")?;
    info!(count = figures.len(), "rendered charts to {}", args.output.display());

    let summary = RunSummary {
        input: args.input.display().to_string(),
        generated_at: Utc::now().to_rfc3339(),
        cleaning: clean_report,
        aggregations: vec![
            named("content_type", content_type),
            named("language", language),
            named("content_type_by_language", content_language),
            named("year", year_totals),
            named("season", season),
            named("month", month),
            named("day_of_week", day_of_week),
        ],
        content_type_growth,
        language_growth,
    };
    let summary_path = args.output.join("summary.json");
    write_summary(&summary_path, &summary)?;
    info!("wrote {}", summary_path.display());

    Ok(())
}

fn named(name: &str, rows: Vec<analysis::AggRow>) -> AggregationSummary {
    AggregationSummary {
        name: name.to_string(),
        rows,
    }
}

fn log_growth(label: &str, table: &GrowthTable) {
    for row in &table.rows {
        debug!(
            year = row.year,
            total = row.total,
            growth = ?row.total_growth_pct,
            "{label} growth"
        );
    }
}
