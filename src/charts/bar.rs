//! Bar Chart Rendering
//! Vertical bar charts with value labels drawn above the bars.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

use super::{axis_billions, series_color, ChartError, BAR_COLOR};
use crate::analysis::AggRow;

/// One bar: category name, raw value and the precomputed label text.
#[derive(Debug, Clone)]
pub struct Bar {
    pub name: String,
    pub value: f64,
    pub label: String,
}

/// Single-series vertical bar chart over a categorical axis.
pub struct BarChart {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub bars: Vec<Bar>,
}

impl BarChart {
    /// Build from aggregated rows, mapping the group key to its display
    /// name (identity for plain categories, month/day names for calendar
    /// keys).
    pub fn from_rows(
        title: &str,
        x_desc: &str,
        rows: &[AggRow],
        display: impl Fn(&str) -> String,
    ) -> Self {
        let bars = rows
            .iter()
            .map(|row| Bar {
                name: display(&row.keys[0]),
                value: row.hours,
                label: row.label.clone(),
            })
            .collect();
        Self {
            title: title.to_string(),
            x_desc: x_desc.to_string(),
            y_desc: "Hours Viewed".to_string(),
            bars,
        }
    }

    pub fn render(&self, path: &Path, size: (u32, u32)) -> Result<(), ChartError> {
        if self.bars.is_empty() {
            return Err(ChartError::Empty(self.title.clone()));
        }

        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(|e| ChartError::Draw(e.to_string()))?;

        let n = self.bars.len();
        let names: Vec<String> = self.bars.iter().map(|b| b.name.clone()).collect();
        // Headroom above the tallest bar for its label text
        let y_max = self.bars.iter().map(|b| b.value).fold(0.0, f64::max) * 1.15;

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, ("sans-serif", 24))
            .margin(12)
            .x_label_area_size(48)
            .y_label_area_size(70)
            .build_cartesian_2d((0..n).into_segmented(), 0f64..y_max)
            .map_err(|e| ChartError::Draw(e.to_string()))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_label_formatter(&|seg| match seg {
                SegmentValue::CenterOf(i) if *i < names.len() => names[*i].clone(),
                _ => String::new(),
            })
            .y_label_formatter(&|v| axis_billions(*v))
            .x_desc(&self.x_desc)
            .y_desc(&self.y_desc)
            .draw()
            .map_err(|e| ChartError::Draw(e.to_string()))?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(BAR_COLOR.filled())
                    .margin(12)
                    .data(self.bars.iter().enumerate().map(|(i, b)| (i, b.value))),
            )
            .map_err(|e| ChartError::Draw(e.to_string()))?;

        let label_style = ("sans-serif", 14)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        chart
            .draw_series(self.bars.iter().enumerate().map(|(i, b)| {
                Text::new(
                    b.label.clone(),
                    (SegmentValue::CenterOf(i), b.value),
                    label_style.clone(),
                )
            }))
            .map_err(|e| ChartError::Draw(e.to_string()))?;

        root.present().map_err(|e| ChartError::Draw(e.to_string()))?;
        Ok(())
    }
}

/// Grouped (side-by-side) bar chart: a primary categorical axis with one
/// colored sub-bar per secondary category.
pub struct GroupedBarChart {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub groups: Vec<String>,
    pub series: Vec<String>,
    /// values[group][series]; 0 marks a combination absent from the data.
    pub values: Vec<Vec<(f64, String)>>,
}

impl GroupedBarChart {
    /// Build from rows aggregated over [primary, secondary] keys. Group
    /// and series orders follow first appearance, which for descending
    /// aggregations ranks groups by their largest value.
    pub fn from_rows(title: &str, x_desc: &str, rows: &[AggRow]) -> Self {
        let mut groups: Vec<String> = Vec::new();
        let mut series: Vec<String> = Vec::new();
        for row in rows {
            if !groups.contains(&row.keys[0]) {
                groups.push(row.keys[0].clone());
            }
            if !series.contains(&row.keys[1]) {
                series.push(row.keys[1].clone());
            }
        }

        let mut values = vec![vec![(0.0, String::new()); series.len()]; groups.len()];
        for row in rows {
            let g = groups.iter().position(|g| *g == row.keys[0]).unwrap();
            let s = series.iter().position(|s| *s == row.keys[1]).unwrap();
            values[g][s] = (row.hours, row.label.clone());
        }

        Self {
            title: title.to_string(),
            x_desc: x_desc.to_string(),
            y_desc: "Hours Viewed".to_string(),
            groups,
            series,
            values,
        }
    }

    pub fn render(&self, path: &Path, size: (u32, u32)) -> Result<(), ChartError> {
        if self.groups.is_empty() || self.series.is_empty() {
            return Err(ChartError::Empty(self.title.clone()));
        }

        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(|e| ChartError::Draw(e.to_string()))?;

        let n_groups = self.groups.len();
        let n_series = self.series.len();
        let y_max = self
            .values
            .iter()
            .flatten()
            .map(|(v, _)| *v)
            .fold(0.0, f64::max)
            * 1.15;

        let group_names = self.groups.clone();
        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, ("sans-serif", 24))
            .margin(12)
            .x_label_area_size(48)
            .y_label_area_size(70)
            .build_cartesian_2d(0f64..n_groups as f64, 0f64..y_max)
            .map_err(|e| ChartError::Draw(e.to_string()))?;

        // Each group occupies one unit slot; labels go on the slot centers.
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n_groups * 2)
            .x_label_formatter(&|x| {
                let frac = x - x.floor();
                if (frac - 0.5).abs() < 0.26 {
                    let idx = x.floor() as usize;
                    group_names.get(idx).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .y_label_formatter(&|v| axis_billions(*v))
            .x_desc(&self.x_desc)
            .y_desc(&self.y_desc)
            .draw()
            .map_err(|e| ChartError::Draw(e.to_string()))?;

        let bar_width = 0.8 / n_series as f64;
        let label_style = ("sans-serif", 12)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Bottom));

        for (s, series_name) in self.series.iter().enumerate() {
            let color = series_color(s);
            chart
                .draw_series(self.groups.iter().enumerate().filter_map(|(g, _)| {
                    let (value, _) = &self.values[g][s];
                    if *value <= 0.0 {
                        return None;
                    }
                    let x0 = g as f64 + 0.1 + s as f64 * bar_width;
                    Some(Rectangle::new(
                        [(x0, 0.0), (x0 + bar_width, *value)],
                        color.filled(),
                    ))
                }))
                .map_err(|e| ChartError::Draw(e.to_string()))?
                .label(series_name)
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
                });

            chart
                .draw_series(self.groups.iter().enumerate().filter_map(|(g, _)| {
                    let (value, label) = &self.values[g][s];
                    if *value <= 0.0 {
                        return None;
                    }
                    let x0 = g as f64 + 0.1 + s as f64 * bar_width;
                    Some(Text::new(
                        label.clone(),
                        (x0 + bar_width / 2.0, *value),
                        label_style.clone(),
                    ))
                }))
                .map_err(|e| ChartError::Draw(e.to_string()))?;
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(|e| ChartError::Draw(e.to_string()))?;

        root.present().map_err(|e| ChartError::Draw(e.to_string()))?;
        Ok(())
    }
}
