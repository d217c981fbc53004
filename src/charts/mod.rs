//! Charts module - static PNG chart rendering

mod bar;
mod line;

pub use bar::{Bar, BarChart, GroupedBarChart};
pub use line::{LineChart, LineSeriesData};

use plotters::style::RGBColor;
use std::path::Path;
use thiserror::Error;

/// Default bar fill when a chart has a single series.
pub const BAR_COLOR: RGBColor = RGBColor(99, 110, 250);

/// Series color palette.
pub const PALETTE: [RGBColor; 8] = [
    RGBColor(31, 119, 180),  // Blue
    RGBColor(255, 127, 14),  // Orange
    RGBColor(44, 160, 44),   // Green
    RGBColor(214, 39, 40),   // Red
    RGBColor(148, 103, 189), // Purple
    RGBColor(140, 86, 75),   // Brown
    RGBColor(227, 119, 194), // Pink
    RGBColor(127, 127, 127), // Gray
];

pub fn series_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

/// Y-axis tick text: raw hours shown in billions.
pub fn axis_billions(value: f64) -> String {
    format!("{:.1}B", value / 1e9)
}

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Chart '{0}' has no data")]
    Empty(String),
    #[error("Failed to draw chart: {0}")]
    Draw(String),
}

/// A renderable chart job; lets the binary fan the full figure set out
/// over a parallel iterator.
pub enum Chart {
    Bar(BarChart),
    GroupedBar(GroupedBarChart),
    Line(LineChart),
}

impl Chart {
    pub fn title(&self) -> &str {
        match self {
            Chart::Bar(c) => &c.title,
            Chart::GroupedBar(c) => &c.title,
            Chart::Line(c) => &c.title,
        }
    }

    pub fn render(&self, path: &Path, size: (u32, u32)) -> Result<(), ChartError> {
        match self {
            Chart::Bar(c) => c.render(path, size),
            Chart::GroupedBar(c) => c.render(path, size),
            Chart::Line(c) => c.render(path, size),
        }
    }
}
