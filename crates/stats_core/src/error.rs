use thiserror::Error;

/// Errors raised at the boundary of the aggregation core.
///
/// Aggregation itself never fails: dirty tracker data is dropped event by
/// event. These variants cover malformed requests, unreadable files and
/// invalid configuration.
#[derive(Error, Debug)]
pub enum StatsError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl StatsError {
    /// Stable machine-readable code, logged with every rejected API request.
    pub fn code(&self) -> &'static str {
        match self {
            StatsError::Json(_) => "JSON_ERROR",
            StatsError::Io(_) => "IO_ERROR",
            StatsError::InvalidRequest(_) => "INVALID_REQUEST",
            StatsError::InvalidConfig(_) => "INVALID_CONFIG",
        }
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
