pub mod analysis;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod report;
pub mod visualization;

pub use analysis::{LeadSummary, MetricsBundle};
pub use config::ReportConfig;
pub use error::ReportError;
pub use io::DatasetReader;
pub use models::Dataset;
pub use report::generate_report;
