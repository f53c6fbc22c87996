use serde::{Deserialize, Serialize};

use crate::analysis::{top_n, unique_count, CategoryCount, DescriptiveStats, RegionBreakdown};
use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::models::Dataset;

/// Number of records whose value lies strictly above a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdCount {
    pub threshold: f64,
    pub count: usize,
}

/// Everything the report states about a lead list, computed once per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsBundle {
    pub record_count: usize,
    pub lot_size: DescriptiveStats,
    /// Most frequent postal codes, limited to `summary_top_n`
    pub top_postal_codes: Vec<CategoryCount>,
    pub unique_postal_codes: usize,
    /// Present only when the mailing-region column exists
    pub region: Option<RegionBreakdown>,
    /// Present only when the equity column exists
    pub high_equity: Option<ThresholdCount>,
    /// Present only when the ownership-length column exists
    pub ownership_length: Option<DescriptiveStats>,
}

impl MetricsBundle {
    /// Compute the bundle. The lot-size and postal-code columns are required.
    pub fn compute(dataset: &Dataset, config: &ReportConfig) -> Result<Self, ReportError> {
        let cols = &config.columns;
        dataset.require_column(&cols.lot_size)?;
        dataset.require_column(&cols.postal_code)?;

        let lot_size = lot_size_stats(dataset, config)
            .unwrap_or_else(|| DescriptiveStats::from_values(&[]));
        let postal_codes = dataset.column(&cols.postal_code).unwrap_or_default();

        let bundle = Self {
            record_count: dataset.num_records(),
            lot_size,
            top_postal_codes: top_n(postal_codes.iter().copied(), config.report.summary_top_n),
            unique_postal_codes: unique_count(postal_codes.iter().copied()),
            region: region_breakdown(dataset, config),
            high_equity: high_equity_count(dataset, config),
            ownership_length: dataset
                .numeric_column(&cols.ownership_length)
                .map(|col| DescriptiveStats::from_column(&col)),
        };

        tracing::debug!(
            records = bundle.record_count,
            lot_values = bundle.lot_size.count,
            unique_postal_codes = bundle.unique_postal_codes,
            has_region = bundle.region.is_some(),
            "computed metrics bundle"
        );
        Ok(bundle)
    }

    pub fn out_of_region_count(&self) -> Option<usize> {
        self.region.as_ref().map(|r| r.out_of_region)
    }

    /// Labeled lot-size statistics in report order.
    pub fn lot_size_rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Total Records", self.record_count.to_string()),
            ("Avg Lot Size", self.lot_size.mean.to_string()),
            ("Median Lot Size", self.lot_size.median.to_string()),
            ("Max Lot Size", self.lot_size.max.to_string()),
            ("Min Lot Size", self.lot_size.min.to_string()),
            ("Std Dev", self.lot_size.std_dev.to_string()),
        ]
    }
}

/// The quick metrics shown next to the data preview.
///
/// Unlike [`MetricsBundle`] no column is required; each metric is simply
/// absent when its column is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadSummary {
    pub record_count: usize,
    pub unique_postal_codes: Option<usize>,
    pub avg_lot_size: Option<f64>,
    pub out_of_region: Option<usize>,
    pub high_equity: Option<ThresholdCount>,
}

impl LeadSummary {
    pub fn compute(dataset: &Dataset, config: &ReportConfig) -> Self {
        Self {
            record_count: dataset.num_records(),
            unique_postal_codes: dataset
                .column(&config.columns.postal_code)
                .map(|col| unique_count(col.iter().copied())),
            avg_lot_size: lot_size_stats(dataset, config).map(|s| s.mean),
            out_of_region: region_breakdown(dataset, config).map(|r| r.out_of_region),
            high_equity: high_equity_count(dataset, config),
        }
    }
}

fn lot_size_stats(dataset: &Dataset, config: &ReportConfig) -> Option<DescriptiveStats> {
    dataset
        .numeric_column(&config.columns.lot_size)
        .map(|col| DescriptiveStats::from_column(&col))
}

fn region_breakdown(dataset: &Dataset, config: &ReportConfig) -> Option<RegionBreakdown> {
    dataset
        .column(&config.columns.mailing_region)
        .map(|col| RegionBreakdown::from_values(col, &config.report.home_region))
}

fn high_equity_count(dataset: &Dataset, config: &ReportConfig) -> Option<ThresholdCount> {
    let threshold = config.report.high_equity_threshold;
    dataset
        .numeric_column(&config.columns.equity_percent)
        .map(|col| ThresholdCount {
            threshold,
            count: col.iter().flatten().filter(|v| **v > threshold).count(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    const HEADERS: [&str; 5] = [
        "Zip",
        "Lot (Acres)",
        "Owner Mailing State",
        "Estimated Equity Percent",
        "Ownership Length (Months)",
    ];

    fn full_dataset() -> Dataset {
        let mut ds = Dataset::new("full", HEADERS);
        ds.push_row(["33101", "1.0", "FL", "80", "12"]);
        ds.push_row(["33101", "2.0", "fl", "70", "24"]);
        ds.push_row(["33102", "3.0", " FL ", "95.5", "x"]);
        ds.push_row(["33103", "bad", "GA", "", "36"]);
        ds
    }

    fn twelve_lots_no_region() -> Dataset {
        let mut ds = Dataset::new("twelve", ["Zip", "Lot (Acres)"]);
        for i in 1..=12 {
            ds.push_row([format!("3310{}", i % 3), i.to_string()]);
        }
        ds
    }

    #[test]
    fn test_twelve_records_no_region() {
        let bundle =
            MetricsBundle::compute(&twelve_lots_no_region(), &ReportConfig::default()).unwrap();
        assert_eq!(bundle.record_count, 12);
        assert_approx_eq!(bundle.lot_size.mean, 6.5);
        assert_approx_eq!(bundle.lot_size.median, 6.5);
        assert_approx_eq!(bundle.lot_size.max, 12.0);
        assert_approx_eq!(bundle.lot_size.min, 1.0);
        assert!(bundle.region.is_none());
        assert!(bundle.out_of_region_count().is_none());
        assert!(bundle.high_equity.is_none());
        assert!(bundle.ownership_length.is_none());
    }

    #[test]
    fn test_full_dataset() {
        let bundle = MetricsBundle::compute(&full_dataset(), &ReportConfig::default()).unwrap();
        assert_eq!(bundle.record_count, 4);
        assert_eq!(bundle.lot_size.count, 3);
        assert_approx_eq!(bundle.lot_size.mean, 2.0);
        assert_eq!(bundle.unique_postal_codes, 3);
        assert_eq!(bundle.top_postal_codes[0].category, "33101");
        assert_eq!(bundle.top_postal_codes[0].count, 2);

        let region = bundle.region.as_ref().unwrap();
        assert_eq!(region.in_region, 3);
        assert_eq!(region.out_of_region, 1);

        // 70 is not strictly above the threshold
        assert_eq!(bundle.high_equity.unwrap().count, 2);

        let ownership = bundle.ownership_length.unwrap();
        assert_eq!(ownership.count, 3);
        assert_approx_eq!(ownership.mean, 24.0);
    }

    #[test]
    fn test_top_postal_codes_limited_to_summary_n() {
        let mut ds = Dataset::new("many", ["Zip", "Lot (Acres)"]);
        for i in 0..20 {
            ds.push_row([format!("{:05}", 33100 + i % 8), "1".to_string()]);
        }
        let bundle = MetricsBundle::compute(&ds, &ReportConfig::default()).unwrap();
        assert_eq!(bundle.top_postal_codes.len(), 5);
        assert_eq!(bundle.unique_postal_codes, 8);
    }

    #[test]
    fn test_missing_lot_size_column() {
        let ds = Dataset::new("nolot", ["Zip"]);
        let err = MetricsBundle::compute(&ds, &ReportConfig::default()).unwrap_err();
        assert!(matches!(err, ReportError::MissingColumn(ref c) if c == "Lot (Acres)"));
    }

    #[test]
    fn test_missing_postal_code_column() {
        let ds = Dataset::new("nozip", ["Lot (Acres)"]);
        let err = MetricsBundle::compute(&ds, &ReportConfig::default()).unwrap_err();
        assert!(matches!(err, ReportError::MissingColumn(ref c) if c == "Zip"));
    }

    #[test]
    fn test_ragged_rows_count_as_missing() {
        let json = r#"{"name":"ragged","headers":["Zip","Lot (Acres)"],"rows":[["33101"]]}"#;
        let ds: Dataset = serde_json::from_str(json).unwrap();
        let bundle = MetricsBundle::compute(&ds, &ReportConfig::default()).unwrap();
        assert_eq!(bundle.record_count, 1);
        assert_eq!(bundle.lot_size.count, 0);
        assert_eq!(bundle.top_postal_codes[0].category, "33101");
    }

    #[test]
    fn test_all_missing_lot_sizes_are_nan() {
        let mut ds = Dataset::new("nan", ["Zip", "Lot (Acres)"]);
        ds.push_row(["33101", "n/a"]);
        ds.push_row(["33101", ""]);
        let bundle = MetricsBundle::compute(&ds, &ReportConfig::default()).unwrap();
        assert!(bundle.lot_size.mean.is_nan());
        assert!(bundle.lot_size.std_dev.is_nan());
        assert_eq!(bundle.lot_size_rows()[1], ("Avg Lot Size", "NaN".to_string()));
    }

    #[test]
    fn test_custom_columns_and_region() {
        let mut ds = Dataset::new("custom", ["ZIP Code", "Acres", "Mail State"]);
        ds.push_row(["30301", "1", "GA"]);
        ds.push_row(["30301", "2", "FL"]);
        let mut config = ReportConfig::default();
        config.columns.postal_code = "ZIP Code".to_string();
        config.columns.lot_size = "Acres".to_string();
        config.columns.mailing_region = "Mail State".to_string();
        config.report.home_region = "ga".to_string();

        let bundle = MetricsBundle::compute(&ds, &config).unwrap();
        let region = bundle.region.unwrap();
        assert_eq!(region.home_region, "GA");
        assert_eq!(region.in_region, 1);
        assert_eq!(region.out_of_region, 1);
    }

    #[test]
    fn test_lot_size_rows_labels() {
        let bundle =
            MetricsBundle::compute(&twelve_lots_no_region(), &ReportConfig::default()).unwrap();
        let labels: Vec<&str> = bundle.lot_size_rows().iter().map(|(l, _)| *l).collect();
        assert_eq!(
            labels,
            vec!["Total Records", "Avg Lot Size", "Median Lot Size", "Max Lot Size", "Min Lot Size", "Std Dev"]
        );
        insta::assert_snapshot!(
            bundle
                .lot_size_rows()
                .iter()
                .map(|(label, value)| format!("{label}: {value}"))
                .collect::<Vec<_>>()
                .join("\n"),
            @r"
        Total Records: 12
        Avg Lot Size: 6.5
        Median Lot Size: 6.5
        Max Lot Size: 12
        Min Lot Size: 1
        Std Dev: 3.61
        "
        );
    }

    #[test]
    fn test_lead_summary_lenient() {
        let ds = Dataset::new("bare", ["Name"]);
        let summary = LeadSummary::compute(&ds, &ReportConfig::default());
        assert_eq!(summary.record_count, 0);
        assert!(summary.unique_postal_codes.is_none());
        assert!(summary.avg_lot_size.is_none());
        assert!(summary.out_of_region.is_none());
        assert!(summary.high_equity.is_none());
    }

    #[test]
    fn test_lead_summary_full() {
        let summary = LeadSummary::compute(&full_dataset(), &ReportConfig::default());
        assert_eq!(summary.record_count, 4);
        assert_eq!(summary.unique_postal_codes, Some(3));
        assert_approx_eq!(summary.avg_lot_size.unwrap(), 2.0);
        assert_eq!(summary.out_of_region, Some(1));
        assert_eq!(summary.high_equity.unwrap().count, 2);
    }

    #[test]
    fn test_summary_matches_bundle() {
        let ds = full_dataset();
        let config = ReportConfig::default();
        let bundle = MetricsBundle::compute(&ds, &config).unwrap();
        let summary = LeadSummary::compute(&ds, &config);
        assert_eq!(summary.out_of_region, bundle.out_of_region_count());
        assert_eq!(summary.high_equity, bundle.high_equity);
        assert_eq!(summary.unique_postal_codes, Some(bundle.unique_postal_codes));
    }

    #[test]
    fn test_bundle_json_roundtrip() {
        let bundle = MetricsBundle::compute(&full_dataset(), &ReportConfig::default()).unwrap();
        let json = serde_json::to_string(&bundle).unwrap();
        let deserialized: MetricsBundle = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.record_count, bundle.record_count);
        assert_eq!(deserialized.top_postal_codes, bundle.top_postal_codes);
    }
}
