use serde::{Deserialize, Serialize};

use crate::analysis::{top_n, CategoryCount, RegionBreakdown, RegionClass};
use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::models::Dataset;

/// Angle, in degrees counter-clockwise from the positive x axis, at which the
/// first pie slice starts.
pub const PIE_START_ANGLE: f64 = 140.0;

/// One equal-width histogram bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Lower edge (inclusive)
    pub lower: f64,
    /// Upper edge (exclusive, except for the last bin)
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Bin values into `num_bins` equal-width bins spanning `[min, max]`.
    ///
    /// When every value is equal the range widens to `[v - 0.5, v + 0.5]`.
    /// No values (or zero bins) yields an empty histogram.
    pub fn from_values(values: &[f64], num_bins: usize) -> Self {
        if values.is_empty() || num_bins == 0 {
            return Self::default();
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let (lo, hi) = if max > min { (min, max) } else { (min - 0.5, max + 0.5) };
        let width = (hi - lo) / num_bins as f64;

        let mut bins: Vec<HistogramBin> = (0..num_bins)
            .map(|i| HistogramBin {
                lower: lo + width * i as f64,
                upper: if i + 1 == num_bins { hi } else { lo + width * (i + 1) as f64 },
                count: 0,
            })
            .collect();

        for v in values {
            let idx = (((v - lo) / width).floor() as usize).min(num_bins - 1);
            bins[idx].count += 1;
        }

        Self { bins }
    }

    /// The `(lower, upper)` span of all bins.
    pub fn range(&self) -> Option<(f64, f64)> {
        Some((self.bins.first()?.lower, self.bins.last()?.upper))
    }

    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// A wedge of the absentee-owner pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub class: RegionClass,
    pub count: usize,
    pub percent: f64,
    /// Start angle in degrees, counter-clockwise from the positive x axis
    pub start_deg: f64,
    pub sweep_deg: f64,
}

impl PieSlice {
    pub fn label(&self) -> String {
        self.class.to_string()
    }

    /// Percentage label as drawn on the wedge.
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.percent)
    }

    pub fn mid_deg(&self) -> f64 {
        self.start_deg + self.sweep_deg / 2.0
    }
}

/// Lay out pie wedges counter-clockwise from `start_deg`, larger class first.
pub fn pie_slices(breakdown: &RegionBreakdown, start_deg: f64) -> Vec<PieSlice> {
    let total = breakdown.total();
    if total == 0 {
        return Vec::new();
    }

    let mut angle = start_deg;
    breakdown
        .classes()
        .into_iter()
        .map(|(class, count)| {
            let fraction = count as f64 / total as f64;
            let slice = PieSlice {
                class,
                count,
                percent: fraction * 100.0,
                start_deg: angle,
                sweep_deg: fraction * 360.0,
            };
            angle += slice.sweep_deg;
            slice
        })
        .collect()
}

/// Everything the three charts draw, computed up front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub lot_size_histogram: Histogram,
    /// Most frequent postal codes, limited to `chart_top_n`
    pub top_postal_codes: Vec<CategoryCount>,
    /// Present only when the mailing-region column exists
    pub absentee_slices: Option<Vec<PieSlice>>,
}

impl ChartData {
    /// Compute chart data, failing fast when the lot-size or postal-code
    /// column is missing.
    pub fn from_dataset(dataset: &Dataset, config: &ReportConfig) -> Result<Self, ReportError> {
        let cols = &config.columns;
        dataset.require_column(&cols.lot_size)?;
        dataset.require_column(&cols.postal_code)?;

        let lot_sizes = dataset.numeric_values(&cols.lot_size).unwrap_or_default();
        let postal_codes = dataset.column(&cols.postal_code).unwrap_or_default();

        let absentee_slices = dataset.column(&cols.mailing_region).map(|col| {
            let breakdown = RegionBreakdown::from_values(col, &config.report.home_region);
            pie_slices(&breakdown, PIE_START_ANGLE)
        });

        Ok(Self {
            lot_size_histogram: Histogram::from_values(&lot_sizes, config.charts.histogram_bins),
            top_postal_codes: top_n(postal_codes, config.charts.chart_top_n),
            absentee_slices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_histogram_bins_cover_range() {
        let values: Vec<f64> = (0..=30).map(f64::from).collect();
        let hist = Histogram::from_values(&values, 30);
        assert_eq!(hist.bins.len(), 30);
        assert_eq!(hist.total(), 31);
        assert_eq!(hist.range(), Some((0.0, 30.0)));
        // the maximum lands in the last, closed bin
        assert_eq!(hist.bins[29].count, 2);
        assert_eq!(hist.bins[0].count, 1);
    }

    #[test]
    fn test_histogram_single_value_widens() {
        let hist = Histogram::from_values(&[5.0, 5.0, 5.0], 30);
        let (lo, hi) = hist.range().unwrap();
        assert_approx_eq!(lo, 4.5);
        assert_approx_eq!(hi, 5.5);
        assert_eq!(hist.total(), 3);
        assert_eq!(hist.max_count(), 3);
    }

    #[test]
    fn test_histogram_empty() {
        let hist = Histogram::from_values(&[], 30);
        assert!(hist.bins.is_empty());
        assert!(hist.range().is_none());
        assert_eq!(hist.max_count(), 0);
        assert!(Histogram::from_values(&[1.0], 0).bins.is_empty());
    }

    #[test]
    fn test_pie_slices_start_angle_and_sweep() {
        let breakdown = RegionBreakdown::from_values(["FL", "GA", "GA", "NY"], "FL");
        let slices = pie_slices(&breakdown, PIE_START_ANGLE);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].class, RegionClass::OutOfRegion);
        assert_approx_eq!(slices[0].start_deg, 140.0);
        assert_approx_eq!(slices[0].sweep_deg, 270.0);
        assert_approx_eq!(slices[1].start_deg, 410.0);
        assert_approx_eq!(slices[1].sweep_deg, 90.0);
        assert_eq!(slices[0].percent_label(), "75.0%");
        assert_eq!(slices[1].percent_label(), "25.0%");
        assert_eq!(slices[1].label(), "In-State");
    }

    #[test]
    fn test_pie_slices_empty_breakdown() {
        let breakdown = RegionBreakdown::from_values(std::iter::empty(), "FL");
        assert!(pie_slices(&breakdown, PIE_START_ANGLE).is_empty());
    }

    #[test]
    fn test_chart_data_from_dataset() {
        let mut ds = Dataset::new("charts", ["Zip", "Lot (Acres)", "Owner Mailing State"]);
        for i in 0..15 {
            ds.push_row([format!("{}", 33100 + i % 12), format!("{}", i), "GA".to_string()]);
        }
        let data = ChartData::from_dataset(&ds, &ReportConfig::default()).unwrap();
        assert_eq!(data.top_postal_codes.len(), 10);
        assert_eq!(data.lot_size_histogram.bins.len(), 30);
        assert_eq!(data.lot_size_histogram.total(), 15);
        let slices = data.absentee_slices.unwrap();
        assert_eq!(slices.len(), 1);
        assert_approx_eq!(slices[0].sweep_deg, 360.0);
    }

    #[test]
    fn test_chart_data_without_region() {
        let mut ds = Dataset::new("charts", ["Zip", "Lot (Acres)"]);
        ds.push_row(["33101", "1"]);
        let data = ChartData::from_dataset(&ds, &ReportConfig::default()).unwrap();
        assert!(data.absentee_slices.is_none());
    }

    #[test]
    fn test_chart_data_requires_columns() {
        let ds = Dataset::new("charts", ["Zip"]);
        let err = ChartData::from_dataset(&ds, &ReportConfig::default()).unwrap_err();
        assert!(matches!(err, ReportError::MissingColumn(_)));
    }
}
