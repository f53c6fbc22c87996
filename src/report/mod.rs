//! Report assembly: metrics, charts, layout, and the PDF file.

mod layout;
mod pdf;

use std::path::PathBuf;

use chrono::Local;

use crate::analysis::MetricsBundle;
use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::models::Dataset;
use crate::visualization::generate_charts;

pub use layout::{layout_report, Block, REPORT_TITLE};
pub use pdf::{render_document, save_document};

/// Run the whole pipeline for one dataset and write the PDF report.
///
/// Required columns are checked before anything is drawn. Chart images and
/// the PDF overwrite earlier files at the configured paths. Returns the path
/// of the written report.
pub fn generate_report(dataset: &Dataset, config: &ReportConfig) -> Result<PathBuf, ReportError> {
    tracing::info!(dataset = %dataset.name, records = dataset.num_records(), "generating report");
    let bundle = MetricsBundle::compute(dataset, config)?;
    render_report(dataset, &bundle, config)
}

/// Draw the charts and write the PDF for metrics already computed from
/// `dataset` with the same `config`.
pub fn render_report(
    dataset: &Dataset,
    bundle: &MetricsBundle,
    config: &ReportConfig,
) -> Result<PathBuf, ReportError> {
    let charts = generate_charts(dataset, config)?;

    let now = Local::now();
    let blocks = layout_report(bundle, &charts, &now.format("%B %d, %Y").to_string());
    let mut doc = render_document(&blocks, &now.format("D:%Y%m%d%H%M%S").to_string())?;

    let output = config.report.output_path.clone();
    save_document(&mut doc, &output)?;
    tracing::info!(path = %output.display(), "wrote report");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leads() -> Dataset {
        let mut ds = Dataset::new("leads", ["Zip", "Lot (Acres)", "Owner Mailing State"]);
        ds.push_row(["33101", "1.5", "FL"]);
        ds.push_row(["33102", "3", "GA"]);
        ds
    }

    fn config_in(dir: &std::path::Path) -> ReportConfig {
        ReportConfig::default().with_paths(Some(dir.join("report.pdf")), Some(dir.join("charts")))
    }

    #[test]
    fn test_render_report_with_precomputed_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let ds = leads();
        let bundle = MetricsBundle::compute(&ds, &config).unwrap();

        let path = render_report(&ds, &bundle, &config).unwrap();
        assert_eq!(path, dir.path().join("report.pdf"));
        assert!(lopdf::Document::load(&path).is_ok());
        assert!(dir.path().join("charts").join("absentee_pie.png").exists());
    }

    #[test]
    fn test_generate_report_draws_charts_into_configured_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        generate_report(&leads(), &config).unwrap();
        for file in ["lot_size_hist.png", "zip_distribution.png", "absentee_pie.png"] {
            assert!(dir.path().join("charts").join(file).exists(), "{file} missing");
        }
    }
}
