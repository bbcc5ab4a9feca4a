// Error handling for chart URL state

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChartUrlError>;

#[derive(Error, Debug)]
pub enum ChartUrlError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid time bound: {0:?}")]
    InvalidTimeBound(String),

    #[error("Invalid time range: {0:?}")]
    InvalidTimeRange(String),

    #[error("Invalid value for query parameter {key}: {value:?}")]
    InvalidQuery { key: &'static str, value: String },

    #[error("Unknown {kind}: {value:?}")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("URL binder is already bound to a location")]
    AlreadyBound,

    #[error("Config error: {0}")]
    Config(String),
}
