mod chart_data;
mod charts;
mod font;
mod tables;

pub use chart_data::{pie_slices, ChartData, Histogram, HistogramBin, PieSlice, PIE_START_ANGLE};
pub use charts::{
    generate_charts, render_charts, ChartArtifacts, ABSENTEE_PIE_FILE, LOT_SIZE_HISTOGRAM_FILE,
    POSTAL_CODE_BAR_FILE,
};
pub use font::{ensure_chart_font, registered_font, ChartText, FONT_FAMILY};
pub use tables::{
    format_lead_summary, format_metrics_tables, format_preview_table, print_lead_summary,
    print_metrics_tables, print_preview_table,
};
