use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, ContentArrangement, Table};

use crate::analysis::{LeadSummary, MetricsBundle};
use crate::models::Dataset;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn heading(output: &mut String, title: &str, rule: usize) {
    output.push_str(&format!("\n{}\n", title.bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(rule)));
}

/// Format the first `rows` records of a dataset as a table.
pub fn format_preview_table(dataset: &Dataset, rows: usize) -> String {
    let mut output = String::new();
    heading(&mut output, "Data Preview", 50);
    output.push_str(&format!(
        "{}\n",
        format!(
            "Showing {} of {} records",
            rows.min(dataset.num_records()),
            dataset.num_records()
        )
        .dimmed()
    ));

    let mut table = new_table();
    table.set_header(dataset.headers.clone());
    for row in dataset.preview(rows) {
        table.add_row(row.iter().map(Cell::new));
    }

    output.push_str(&format!("{table}"));
    output
}

/// Print a data preview table.
pub fn print_preview_table(dataset: &Dataset, rows: usize) {
    print!("{}", format_preview_table(dataset, rows));
}

/// Format the quick summary metrics. Metrics whose column is missing are
/// left out.
pub fn format_lead_summary(summary: &LeadSummary) -> String {
    let mut output = String::new();
    heading(&mut output, "Summary Metrics", 50);

    let mut table = new_table();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![
        Cell::new("Total Records"),
        Cell::new(summary.record_count),
    ]);
    if let Some(n) = summary.unique_postal_codes {
        table.add_row(vec![Cell::new("Unique ZIP Codes"), Cell::new(n)]);
    }
    if let Some(avg) = summary.avg_lot_size {
        table.add_row(vec![Cell::new("Avg Lot Size (Acres)"), Cell::new(avg)]);
    }
    if let Some(n) = summary.out_of_region {
        table.add_row(vec![Cell::new("Out-of-State Owners"), Cell::new(n)]);
    }
    if let Some(high) = summary.high_equity {
        table.add_row(vec![
            Cell::new(format!("Equity > {}%", high.threshold)),
            Cell::new(high.count),
        ]);
    }

    output.push_str(&format!("{table}"));
    output
}

/// Print the quick summary metrics.
pub fn print_lead_summary(summary: &LeadSummary) {
    print!("{}", format_lead_summary(summary));
}

/// Format lot-size statistics and the top postal codes of a bundle.
pub fn format_metrics_tables(bundle: &MetricsBundle) -> String {
    let mut output = String::new();
    heading(&mut output, "Lot Size Statistics", 50);

    let mut table = new_table();
    table.set_header(vec!["Statistic", "Value"]);
    for (label, value) in bundle.lot_size_rows() {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    output.push_str(&format!("{table}"));

    heading(&mut output, "Top ZIP Codes", 50);
    let mut table = new_table();
    table.set_header(vec!["Rank", "ZIP", "Sellers"]);
    for (i, zip) in bundle.top_postal_codes.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(zip.label()),
            Cell::new(zip.count),
        ]);
    }
    output.push_str(&format!("{table}"));

    if let Some(region) = &bundle.region {
        output.push_str(&format!(
            "\n  Out-of-State Owners: {} of {}\n",
            region.out_of_region.to_string().yellow(),
            region.total()
        ));
    }
    output
}

/// Print lot-size statistics and the top postal codes.
pub fn print_metrics_tables(bundle: &MetricsBundle) {
    print!("{}", format_metrics_tables(bundle));
}
