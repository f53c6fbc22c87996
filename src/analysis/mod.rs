mod statistics;
mod frequency;
mod region;
mod metrics;

pub use statistics::{round2, DescriptiveStats};
pub use frequency::{top_n, unique_count, value_counts, CategoryCount};
pub use region::{RegionBreakdown, RegionClass};
pub use metrics::{LeadSummary, MetricsBundle, ThresholdCount};
