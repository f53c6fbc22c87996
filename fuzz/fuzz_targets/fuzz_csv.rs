#![no_main]

use libfuzzer_sys::fuzz_target;
use seller_report::{
    analysis::{LeadSummary, MetricsBundle},
    io::read_csv_from_bytes,
    visualization::ChartData,
    ReportConfig,
};

fuzz_target!(|data: &[u8]| {
    let Ok(dataset) = read_csv_from_bytes(data, "fuzz") else {
        return;
    };
    let config = ReportConfig::default();

    let summary = LeadSummary::compute(&dataset, &config);
    assert_eq!(summary.record_count, dataset.num_records());

    if let Ok(bundle) = MetricsBundle::compute(&dataset, &config) {
        let stats = bundle.lot_size;
        if stats.count > 0 && stats.mean.is_finite() {
            // statistics are rounded to cents independently
            assert!(stats.min - 0.01 <= stats.mean && stats.mean <= stats.max + 0.01);
        }
        if let Some(region) = &bundle.region {
            assert_eq!(region.total(), dataset.num_records());
        }
    }

    if let Ok(charts) = ChartData::from_dataset(&dataset, &config) {
        let lot_values = dataset
            .numeric_values(&config.columns.lot_size)
            .map_or(0, |v| v.len());
        assert_eq!(charts.lot_size_histogram.total(), lot_values);
    }
});
