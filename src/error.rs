use thiserror::Error;

/// Errors that can occur while building a seller report.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Missing required column: '{0}'")]
    MissingColumn(String),

    #[error("Chart error: {0}")]
    Chart(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
}
