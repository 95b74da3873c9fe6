//! Error types for the relay

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Empty payload")]
    EmptyPayload,

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Delivery failed: {0}")]
    Delivery(String),
}

impl RelayError {
    /// Whether the caller sent something we could not read (as opposed to a failure on our side)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RelayError::EmptyPayload | RelayError::InvalidPayload(_) | RelayError::Json(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
