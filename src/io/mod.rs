mod csv_io;
mod json_io;

use std::path::Path;

use crate::error::ReportError;
use crate::models::Dataset;

pub use csv_io::{read_csv, read_csv_from_bytes, write_csv};
pub use json_io::metrics_to_json;

/// Trait for reading a lead list from a file.
pub trait DatasetReader {
    fn read(&self, path: &Path) -> Result<Dataset, ReportError>;
}

/// CSV lead list reader.
pub struct CsvFormat;

impl DatasetReader for CsvFormat {
    fn read(&self, path: &Path) -> Result<Dataset, ReportError> {
        read_csv(path)
    }
}
