use std::io::Read;
use std::path::Path;

use crate::error::ReportError;
use crate::models::Dataset;

fn csv_reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source)
}

fn parse_csv_records<R: Read>(
    rdr: &mut csv::Reader<R>,
    name: &str,
) -> Result<Dataset, ReportError> {
    let headers = rdr.headers()?.clone();
    let mut dataset = Dataset::new(name, headers.iter());

    for result in rdr.records() {
        let record = result?;
        dataset.push_row(record.iter());
    }

    tracing::debug!(
        name,
        records = dataset.num_records(),
        columns = dataset.num_columns(),
        "parsed CSV"
    );
    Ok(dataset)
}

/// Read a lead list from a CSV file. The dataset is named after the file stem.
pub fn read_csv(path: impl AsRef<Path>) -> Result<Dataset, ReportError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    parse_csv_records(&mut csv_reader(file), &name)
}

/// Read a lead list from CSV bytes.
pub fn read_csv_from_bytes(data: &[u8], name: &str) -> Result<Dataset, ReportError> {
    parse_csv_records(&mut csv_reader(data), name)
}

/// Write a dataset back out as CSV, header row first.
pub fn write_csv(dataset: &Dataset, path: impl AsRef<Path>) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_path(path.as_ref())?;
    wtr.write_record(&dataset.headers)?;
    for row in &dataset.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}
