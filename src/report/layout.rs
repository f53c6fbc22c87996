use std::path::PathBuf;

use crate::analysis::MetricsBundle;
use crate::visualization::ChartArtifacts;

pub const REPORT_TITLE: &str = "Vacant Land Seller Insights Report";

/// One element of the report's top-to-bottom flow. Sizes are in millimetres.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Bold 16pt, centered
    Title(String),
    /// Regular 12pt, centered
    Centered(String),
    /// Bold 14pt section heading
    Heading(String),
    /// Regular 12pt body line
    Line(String),
    /// Image placed at `x_mm` from the left edge, scaled to `width_mm` wide
    Image { path: PathBuf, x_mm: f64, width_mm: f64 },
    /// Vertical space
    Gap(f64),
}

/// Lay out the report sections in their fixed order.
///
/// The absentee section appears only when the bundle has a region breakdown
/// and the pie chart was drawn.
pub fn layout_report(bundle: &MetricsBundle, charts: &ChartArtifacts, date: &str) -> Vec<Block> {
    let mut blocks = vec![
        Block::Title(REPORT_TITLE.to_string()),
        Block::Centered(format!("Generated on: {date}")),
        Block::Gap(10.0),
        Block::Heading("Lot Size Statistics".to_string()),
    ];
    blocks.extend(
        bundle
            .lot_size_rows()
            .into_iter()
            .map(|(label, value)| Block::Line(format!("{label}: {value}"))),
    );
    blocks.push(Block::Gap(5.0));

    if let (Some(region), Some(pie)) = (&bundle.region, &charts.absentee_pie) {
        blocks.push(Block::Heading("Absentee Owners".to_string()));
        blocks.push(Block::Line(format!(
            "Out-of-State Owners: {} of {}",
            region.out_of_region, bundle.record_count
        )));
        blocks.push(Block::Image {
            path: pie.clone(),
            x_mm: 30.0,
            width_mm: 150.0,
        });
        blocks.push(Block::Gap(10.0));
    }

    blocks.push(Block::Heading("Top ZIP Codes".to_string()));
    blocks.extend(
        bundle
            .top_postal_codes
            .iter()
            .map(|zip| Block::Line(format!("{}: {} sellers", zip.label(), zip.count))),
    );
    blocks.push(Block::Image {
        path: charts.postal_code_bar.clone(),
        x_mm: 20.0,
        width_mm: 170.0,
    });
    blocks.push(Block::Gap(10.0));

    blocks.push(Block::Heading("Lot Size Distribution".to_string()));
    blocks.push(Block::Image {
        path: charts.lot_size_histogram.clone(),
        x_mm: 20.0,
        width_mm: 170.0,
    });

    tracing::debug!(blocks = blocks.len(), "laid out report");
    blocks
}
