use std::error::Error;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::analysis::CategoryCount;
use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::models::Dataset;

use super::chart_data::{ChartData, Histogram, PieSlice};
use super::font::{ensure_chart_font, ChartText, FONT_FAMILY};

pub const LOT_SIZE_HISTOGRAM_FILE: &str = "lot_size_hist.png";
pub const POSTAL_CODE_BAR_FILE: &str = "zip_distribution.png";
pub const ABSENTEE_PIE_FILE: &str = "absentee_pie.png";

const WIDE_CHART_SIZE: (u32, u32) = (600, 400);
const PIE_CHART_SIZE: (u32, u32) = (400, 400);

const HISTOGRAM_COLOR: RGBColor = RGBColor(31, 119, 180);
const BAR_COLOR: RGBColor = RGBColor(135, 206, 235);
const PIE_COLORS: [RGBColor; 2] = [RGBColor(31, 119, 180), RGBColor(255, 127, 14)];

type DrawResult = Result<(), Box<dyn Error>>;

/// Paths of the chart images written for one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartArtifacts {
    pub lot_size_histogram: PathBuf,
    pub postal_code_bar: PathBuf,
    /// Absent when the dataset has no mailing-region column
    pub absentee_pie: Option<PathBuf>,
}

/// Compute chart data for a dataset and draw it into the configured chart
/// directory.
pub fn generate_charts(
    dataset: &Dataset,
    config: &ReportConfig,
) -> Result<ChartArtifacts, ReportError> {
    let data = ChartData::from_dataset(dataset, config)?;
    let text = ensure_chart_font(config.charts.font_path.as_deref());
    render_charts(&data, &config.charts.chart_dir, text)
}

/// Draw each chart to its own PNG in `chart_dir`, creating the directory if
/// needed and overwriting earlier images.
///
/// Every chart is presented and its drawing area dropped before the next one
/// is started.
pub fn render_charts(
    data: &ChartData,
    chart_dir: &Path,
    text: ChartText,
) -> Result<ChartArtifacts, ReportError> {
    std::fs::create_dir_all(chart_dir)?;

    let lot_size_histogram = chart_dir.join(LOT_SIZE_HISTOGRAM_FILE);
    draw_histogram(&lot_size_histogram, &data.lot_size_histogram, text).map_err(chart_error)?;
    tracing::info!(path = %lot_size_histogram.display(), "wrote lot size histogram");

    let postal_code_bar = chart_dir.join(POSTAL_CODE_BAR_FILE);
    draw_postal_code_bars(&postal_code_bar, &data.top_postal_codes, text).map_err(chart_error)?;
    tracing::info!(path = %postal_code_bar.display(), "wrote postal code bar chart");

    let absentee_pie = match &data.absentee_slices {
        Some(slices) => {
            let path = chart_dir.join(ABSENTEE_PIE_FILE);
            draw_absentee_pie(&path, slices, text).map_err(chart_error)?;
            tracing::info!(path = %path.display(), "wrote absentee owner pie chart");
            Some(path)
        }
        None => {
            tracing::info!("no mailing region column, skipping absentee owner pie chart");
            None
        }
    };

    Ok(ChartArtifacts {
        lot_size_histogram,
        postal_code_bar,
        absentee_pie,
    })
}

fn chart_error(e: Box<dyn Error>) -> ReportError {
    ReportError::Chart(e.to_string())
}

fn draw_histogram(path: &Path, hist: &Histogram, text: ChartText) -> DrawResult {
    let root = BitMapBackend::new(path, WIDE_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let (lo, hi) = hist.range().unwrap_or((0.0, 1.0));
    let y_top = hist.max_count().max(1) as f64 * 1.05;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(12);
    if text == ChartText::Labeled {
        builder
            .caption("Lot Size Distribution (Acres)", (FONT_FAMILY, 20))
            .x_label_area_size(40)
            .y_label_area_size(50);
    }
    let mut chart = builder.build_cartesian_2d(lo..hi, 0f64..y_top)?;

    if text == ChartText::Labeled {
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Lot Size")
            .y_desc("Property Count")
            .y_label_formatter(&|v| format!("{:.0}", v))
            .label_style((FONT_FAMILY, 12))
            .draw()?;
    }

    chart.draw_series(hist.bins.iter().filter(|b| b.count > 0).map(|b| {
        Rectangle::new(
            [(b.lower, 0.0), (b.upper, b.count as f64)],
            HISTOGRAM_COLOR.mix(0.75).filled(),
        )
    }))?;
    chart.draw_series(hist.bins.iter().filter(|b| b.count > 0).map(|b| {
        Rectangle::new([(b.lower, 0.0), (b.upper, b.count as f64)], WHITE.stroke_width(1))
    }))?;

    root.present()?;
    Ok(())
}

fn draw_postal_code_bars(path: &Path, ranked: &[CategoryCount], text: ChartText) -> DrawResult {
    let root = BitMapBackend::new(path, WIDE_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    // One unit-wide slot per postal code, bar `i` centered on `i + 0.5`.
    let slots = ranked.len().max(1) as f64;
    let y_top = ranked.iter().map(|c| c.count).max().unwrap_or(0).max(1) + 1;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(12);
    if text == ChartText::Labeled {
        builder
            .caption("Top ZIP Codes by Property Count", (FONT_FAMILY, 20))
            .x_label_area_size(40)
            .y_label_area_size(50);
    }
    let mut chart = builder.build_cartesian_2d(0f64..slots, 0usize..y_top)?;

    if text == ChartText::Labeled {
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(0)
            .y_desc("Property Count")
            .label_style((FONT_FAMILY, 12))
            .draw()?;
    }

    chart.draw_series(ranked.iter().enumerate().map(|(i, c)| {
        let (left, right) = bar_span(i);
        Rectangle::new([(left, 0), (right, c.count)], BAR_COLOR.filled())
    }))?;

    if text == ChartText::Labeled {
        let style = TextStyle::from((FONT_FAMILY, 12).into_font())
            .pos(Pos::new(HPos::Center, VPos::Top));
        for (i, c) in ranked.iter().enumerate() {
            let (x, y) = chart.backend_coord(&(i as f64 + 0.5, 0));
            root.draw(&Text::new(c.label().to_string(), (x, y + 6), style.clone()))?;
        }
    }

    root.present()?;
    Ok(())
}

/// Horizontal extent of bar `i` within its slot.
fn bar_span(i: usize) -> (f64, f64) {
    (i as f64 + 0.1, i as f64 + 0.9)
}

fn draw_absentee_pie(path: &Path, slices: &[PieSlice], text: ChartText) -> DrawResult {
    let root = BitMapBackend::new(path, PIE_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let titled;
    let area = if text == ChartText::Labeled {
        titled = root.titled("Absentee Owner Breakdown", (FONT_FAMILY, 20))?;
        &titled
    } else {
        &root
    };

    let (w, h) = area.dim_in_pixel();
    let center = (w as f64 / 2.0, h as f64 / 2.0);
    let radius = w.min(h) as f64 * 0.35;

    for (i, slice) in slices.iter().enumerate() {
        let color = PIE_COLORS[i % PIE_COLORS.len()];
        area.draw(&Polygon::new(wedge_points(center, radius, slice), color.filled()))?;
    }

    if text == ChartText::Labeled {
        let style = TextStyle::from((FONT_FAMILY, 15).into_font())
            .pos(Pos::new(HPos::Center, VPos::Center));
        for slice in slices {
            let mid = slice.mid_deg();
            area.draw(&Text::new(
                slice.percent_label(),
                polar(center, radius * 0.6, mid),
                style.clone(),
            ))?;
            area.draw(&Text::new(
                slice.label(),
                polar(center, radius * 1.18, mid),
                style.clone(),
            ))?;
        }
    }

    root.present()?;
    Ok(())
}

/// Pixel position at `deg` degrees counter-clockwise from the positive x axis.
fn polar(center: (f64, f64), radius: f64, deg: f64) -> (i32, i32) {
    let rad = deg.to_radians();
    (
        (center.0 + radius * rad.cos()).round() as i32,
        (center.1 - radius * rad.sin()).round() as i32,
    )
}

/// Outline of a wedge: the center followed by its arc in one-degree steps.
fn wedge_points(center: (f64, f64), radius: f64, slice: &PieSlice) -> Vec<(i32, i32)> {
    let steps = slice.sweep_deg.ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push(polar(center, 0.0, 0.0));
    for step in 0..=steps {
        let deg = slice.start_deg + slice.sweep_deg * step as f64 / steps as f64;
        points.push(polar(center, radius, deg));
    }
    points
}
