use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Median, Statistics};

/// Descriptive statistics for one numeric column, rounded to 2 decimals.
///
/// Computed over non-missing values only. With no values every statistic is
/// NaN; with a single value the sample standard deviation is NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    /// Number of non-missing values the statistics were computed from
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub max: f64,
    pub min: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Compute statistics over a set of values.
    ///
    /// # Examples
    ///
    /// ```
    /// use seller_report::analysis::DescriptiveStats;
    ///
    /// let stats = DescriptiveStats::from_values(&[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(stats.mean, 2.5);
    /// assert_eq!(stats.median, 2.5);
    /// assert_eq!(stats.std_dev, 1.29);
    /// ```
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                count: 0,
                mean: f64::NAN,
                median: f64::NAN,
                max: f64::NAN,
                min: f64::NAN,
                std_dev: f64::NAN,
            };
        }

        let median = Data::new(values.to_vec()).median();

        Self {
            count: values.len(),
            mean: round2(values.iter().mean()),
            median: round2(median),
            max: round2(Statistics::max(values.iter())),
            min: round2(Statistics::min(values.iter())),
            std_dev: round2(values.iter().std_dev()),
        }
    }

    /// Statistics over the present values of a coerced column.
    pub fn from_column(column: &[Option<f64>]) -> Self {
        let values: Vec<f64> = column.iter().flatten().copied().collect();
        Self::from_values(&values)
    }

    /// True when there were no values to describe.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Round to 2 decimal places, leaving NaN untouched.
///
/// Values too large to scale by 100 are returned as is; they have no
/// fractional digits to round anyway.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        value
    }
}
