//! Line Chart Rendering
//! Year-axis line charts with one marked line per category.

use plotters::prelude::*;
use std::path::Path;

use super::{axis_billions, series_color, ChartError};
use crate::analysis::YearPoint;

/// One line: category name and its (year, hours) points.
#[derive(Debug, Clone)]
pub struct LineSeriesData {
    pub name: String,
    pub points: Vec<(i32, f64)>,
}

/// Multi-series line chart over a numeric year axis, markers enabled.
pub struct LineChart {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub series: Vec<LineSeriesData>,
}

impl LineChart {
    /// Build from year-series points (sorted by year ascending). Series
    /// order follows first appearance.
    pub fn from_points(title: &str, x_desc: &str, points: &[YearPoint]) -> Self {
        let mut series: Vec<LineSeriesData> = Vec::new();
        for point in points {
            match series.iter_mut().find(|s| s.name == point.category) {
                Some(s) => s.points.push((point.year, point.hours)),
                None => series.push(LineSeriesData {
                    name: point.category.clone(),
                    points: vec![(point.year, point.hours)],
                }),
            }
        }
        Self {
            title: title.to_string(),
            x_desc: x_desc.to_string(),
            y_desc: "Hours Viewed".to_string(),
            series,
        }
    }

    pub fn render(&self, path: &Path, size: (u32, u32)) -> Result<(), ChartError> {
        if self.series.iter().all(|s| s.points.is_empty()) {
            return Err(ChartError::Empty(self.title.clone()));
        }

        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(|e| ChartError::Draw(e.to_string()))?;

        let years: Vec<i32> = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|(y, _)| *y))
            .collect();
        let mut x_min = years.iter().copied().min().unwrap_or(0);
        let mut x_max = years.iter().copied().max().unwrap_or(1);
        if x_min == x_max {
            // single-year data still needs a non-degenerate axis
            x_min -= 1;
            x_max += 1;
        }
        let y_max = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|(_, v)| *v))
            .fold(0.0, f64::max)
            * 1.1;

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, ("sans-serif", 24))
            .margin(12)
            .x_label_area_size(48)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)
            .map_err(|e| ChartError::Draw(e.to_string()))?;

        chart
            .configure_mesh()
            .x_labels((x_max - x_min + 1) as usize)
            .x_label_formatter(&|year| year.to_string())
            .y_label_formatter(&|v| axis_billions(*v))
            .x_desc(&self.x_desc)
            .y_desc(&self.y_desc)
            .draw()
            .map_err(|e| ChartError::Draw(e.to_string()))?;

        for (i, series) in self.series.iter().enumerate() {
            let color = series_color(i);
            chart
                .draw_series(
                    LineSeries::new(series.points.iter().copied(), color.stroke_width(2))
                        .point_size(4),
                )
                .map_err(|e| ChartError::Draw(e.to_string()))?
                .label(&series.name)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 12, y)], color.stroke_width(2))
                });
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

#[cfg(test)]
mod tests {
    use super::*;

    fn point(year: i32, category: &str, hours: f64) -> YearPoint {
        YearPoint {
            year,
            category: category.to_string(),
            hours,
        }
    }

    #[test]
    fn groups_points_into_series() {
        let chart = LineChart::from_points(
            "Hours Viewed by Year and Content Type",
            "Year",
            &[
                point(2020, "Movie", 1.0e9),
                point(2020, "Show", 2.0e9),
                point(2021, "Movie", 1.5e9),
            ],
        );
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].name, "Movie");
        assert_eq!(chart.series[0].points, vec![(2020, 1.0e9), (2021, 1.5e9)]);
    }

    #[test]
    fn line_chart_renders_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("line.png");
        let chart = LineChart::from_points(
            "Hours Viewed by Year and Language",
            "Year",
            &[
                point(2020, "English", 3.0e9),
                point(2021, "English", 4.0e9),
                point(2021, "Korean", 1.0e9),
            ],
        );
        chart.render(&path, (800, 500)).unwrap();
        assert!(path.metadata().unwrap().len() > 0);
    }

    #[test]
    fn single_year_axis_is_padded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("single.png");
        let chart =
            LineChart::from_points("one year", "Year", &[point(2023, "Movie", 1.0e9)]);
        chart.render(&path, (400, 300)).unwrap();
    }
}
