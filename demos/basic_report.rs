//! Basic report example: load a lead list, print its statistics, and write
//! the PDF report.
//!
//! Run from the project root:
//!   cargo run --example basic_report

use std::path::Path;

use seller_report::analysis::MetricsBundle;
use seller_report::io::{CsvFormat, DatasetReader};
use seller_report::visualization::print_metrics_tables;
use seller_report::{generate_report, ReportConfig};

fn main() {
    let path = Path::new("data/samples/sample_leads.csv");
    let reader = CsvFormat;

    let dataset = reader.read(path).expect("Failed to read CSV file");
    println!(
        "Loaded '{}': {} leads, {} columns",
        dataset.name,
        dataset.num_records(),
        dataset.num_columns()
    );

    let config = ReportConfig::default();
    let bundle = MetricsBundle::compute(&dataset, &config).expect("Lead list is missing columns");
    print_metrics_tables(&bundle);

    match generate_report(&dataset, &config) {
        Ok(pdf) => println!("\nReport written to {}", pdf.display()),
        Err(e) => eprintln!("Could not generate report: {e}"),
    }
}
