//! Report configuration: column names, output locations and query parameters.
//!
//! Every field has a default matching a Propwire vacant-land export, so an
//! empty TOML file (or no file at all) yields a working configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// Default PDF output path, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "Vacant_Land_Seller_Report.pdf";

/// Default directory for chart images.
pub const DEFAULT_CHART_DIR: &str = "assets";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub columns: ColumnNames,
    pub report: ReportSettings,
    pub charts: ChartSettings,
}

/// Header names of the columns the report reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub lot_size: String,
    pub postal_code: String,
    pub mailing_region: String,
    pub equity_percent: String,
    pub ownership_length: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            lot_size: "Lot (Acres)".to_string(),
            postal_code: "Zip".to_string(),
            mailing_region: "Owner Mailing State".to_string(),
            equity_percent: "Estimated Equity Percent".to_string(),
            ownership_length: "Ownership Length (Months)".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Where the PDF is written. Existing files are overwritten.
    pub output_path: PathBuf,
    /// Region code that counts as "in-region" (compared trimmed, upper-cased).
    pub home_region: String,
    /// Equity percentage strictly above which a lead counts as high equity.
    pub high_equity_threshold: f64,
    /// Number of postal codes listed in the summary and the PDF text.
    pub summary_top_n: usize,
    /// Number of rows shown by the preview table.
    pub preview_rows: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            home_region: "FL".to_string(),
            high_equity_threshold: 70.0,
            summary_top_n: 5,
            preview_rows: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Directory the chart images are written to; created if absent.
    pub chart_dir: PathBuf,
    /// Number of postal codes drawn in the bar chart.
    pub chart_top_n: usize,
    pub histogram_bins: usize,
    /// TrueType font used for chart text. When unset, common system
    /// locations are searched.
    pub font_path: Option<PathBuf>,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            chart_dir: PathBuf::from(DEFAULT_CHART_DIR),
            chart_top_n: 10,
            histogram_bins: 30,
            font_path: None,
        }
    }
}

impl ReportConfig {
    /// Parse a configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ReportError> {
        Ok(toml::from_str(contents)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// Override the output locations, as the CLI flags do.
    pub fn with_paths(mut self, output: Option<PathBuf>, chart_dir: Option<PathBuf>) -> Self {
        if let Some(output) = output {
            self.report.output_path = output;
        }
        if let Some(dir) = chart_dir {
            self.charts.chart_dir = dir;
        }
        self
    }
}
