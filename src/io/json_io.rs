use crate::analysis::MetricsBundle;
use crate::error::ReportError;

/// Serialize a metrics bundle to JSON. NaN statistics become `null`.
pub fn metrics_to_json(bundle: &MetricsBundle, pretty: bool) -> Result<String, ReportError> {
    let content = if pretty {
        serde_json::to_string_pretty(bundle)?
    } else {
        serde_json::to_string(bundle)?
    };
    Ok(content)
}
