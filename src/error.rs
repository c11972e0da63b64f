use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid event: {0}")]
    InvalidEvent(String),
    #[error("Invalid view: {0}")]
    InvalidView(String),
}
