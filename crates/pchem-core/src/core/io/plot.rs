//! SVG charts rendered with `plotters`.
//!
//! A [`LinePlot`] is one panel: a set of named [`Series`] (lines or scatter points),
//! optional vertical marker lines, and an optional logarithmic x-axis. Several panels
//! can be stacked vertically into one file with [`render_panels`].

use super::{OutputError, ensure_parent_dir};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;
use tracing::info;

const WIDTH: u32 = 960;
const PANEL_HEIGHT: u32 = 600;
const RANGE_PADDING: f64 = 0.05;

const PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesStyle {
    Line,
    Points,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub style: SeriesStyle,
}

impl Series {
    pub fn line(label: impl Into<String>, xs: &[f64], ys: &[f64]) -> Self {
        Self {
            label: label.into(),
            points: xs.iter().copied().zip(ys.iter().copied()).collect(),
            style: SeriesStyle::Line,
        }
    }

    pub fn points(label: impl Into<String>, xs: &[f64], ys: &[f64]) -> Self {
        Self {
            style: SeriesStyle::Points,
            ..Self::line(label, xs, ys)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub x: f64,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinePlot {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
    pub markers: Vec<Marker>,
    pub log_x: bool,
}

impl LinePlot {
    pub fn new(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            ..Default::default()
        }
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_marker(mut self, x: f64, label: impl Into<String>) -> Self {
        self.markers.push(Marker {
            x,
            label: label.into(),
        });
        self
    }

    pub fn with_log_x(mut self) -> Self {
        self.log_x = true;
        self
    }

    fn transform_x(&self, x: f64) -> Option<f64> {
        if self.log_x {
            (x > 0.0).then(|| x.log10())
        } else {
            Some(x)
        }
    }

    fn bounds(&self) -> ((f64, f64), (f64, f64)) {
        let mut x_range = (f64::INFINITY, f64::NEG_INFINITY);
        let mut y_range = (f64::INFINITY, f64::NEG_INFINITY);
        for &(x, y) in self.series.iter().flat_map(|s| s.points.iter()) {
            let Some(x) = self.transform_x(x) else {
                continue;
            };
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            x_range = (x_range.0.min(x), x_range.1.max(x));
            y_range = (y_range.0.min(y), y_range.1.max(y));
        }
        for x in self.markers.iter().filter_map(|m| self.transform_x(m.x)) {
            x_range = (x_range.0.min(x), x_range.1.max(x));
        }
        (padded(x_range), padded(y_range))
    }
}

fn padded((lo, hi): (f64, f64)) -> (f64, f64) {
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let span = hi - lo;
    if span <= f64::EPSILON * lo.abs().max(1.0) {
        let half = lo.abs().max(1.0) * RANGE_PADDING;
        return (lo - half, hi + half);
    }
    (lo - span * RANGE_PADDING, hi + span * RANGE_PADDING)
}

pub fn render_svg(path: &Path, plot: &LinePlot) -> Result<(), OutputError> {
    render_panels(path, std::slice::from_ref(plot))
}

/// Renders `panels` stacked top to bottom into a single SVG file.
pub fn render_panels(path: &Path, panels: &[LinePlot]) -> Result<(), OutputError> {
    ensure_parent_dir(path)?;
    let plot_err = |e: Box<dyn Error>| OutputError::Plot {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let height = PANEL_HEIGHT * panels.len().max(1) as u32;
    let root = SVGBackend::new(path, (WIDTH, height)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| plot_err(Box::new(e)))?;
    let areas = root.split_evenly((panels.len().max(1), 1));
    for (area, panel) in areas.iter().zip(panels) {
        draw_panel(area, panel).map_err(plot_err)?;
    }
    root.present().map_err(|e| plot_err(Box::new(e)))?;
    info!("Saved plot to {}", path.display());
    Ok(())
}

fn draw_panel(area: &DrawingArea<SVGBackend<'_>, Shift>, panel: &LinePlot) -> Result<(), Box<dyn Error>> {
    let ((x_min, x_max), (y_min, y_max)) = panel.bounds();
    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(45)
        .y_label_area_size(80)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    let log_formatter = |v: &f64| format!("{:.1e}", 10f64.powf(*v));
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(panel.x_label.as_str())
        .y_desc(panel.y_label.as_str());
    if panel.log_x {
        mesh.x_label_formatter(&log_formatter);
    }
    mesh.draw()?;

    let mut has_legend = false;
    for (i, series) in panel.series.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let points: Vec<(f64, f64)> = series
            .points
            .iter()
            .filter_map(|&(x, y)| panel.transform_x(x).map(|x| (x, y)))
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect();
        let anno = match series.style {
            SeriesStyle::Line => chart.draw_series(LineSeries::new(points, color.stroke_width(2)))?,
            SeriesStyle::Points => chart.draw_series(
                points
                    .into_iter()
                    .map(|p| Circle::new(p, 4, color.filled())),
            )?,
        };
        if !series.label.is_empty() {
            has_legend = true;
            anno.label(series.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        }
    }

    for marker in &panel.markers {
        let Some(x) = panel.transform_x(marker.x) else {
            continue;
        };
        let style = BLACK.mix(0.6).stroke_width(1);
        let anno = chart.draw_series(std::iter::once(PathElement::new(
            vec![(x, y_min), (x, y_max)],
            style,
        )))?;
        if !marker.label.is_empty() {
            has_legend = true;
            anno.label(marker.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
        }
    }

    if has_legend {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }
    Ok(())
}
