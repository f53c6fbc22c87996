//! Lead summary example: preview a lead list and show quick metrics, using a
//! configuration with a different home region.
//!
//! Run from the project root:
//!   cargo run --example lead_summary

use seller_report::analysis::LeadSummary;
use seller_report::io::read_csv;
use seller_report::visualization::{print_lead_summary, print_preview_table};
use seller_report::ReportConfig;

const CONFIG: &str = r#"
[report]
home_region = "GA"
high_equity_threshold = 90.0
"#;

fn main() {
    let dataset = read_csv("data/samples/sample_leads.csv").expect("Failed to read CSV file");
    let config = ReportConfig::from_toml_str(CONFIG).expect("Invalid configuration");

    print_preview_table(&dataset, config.report.preview_rows);
    print_lead_summary(&LeadSummary::compute(&dataset, &config));
    println!();
}
