//! Error types for answer generation.

use thiserror::Error;

/// Result type alias for answer operations.
pub type Result<T> = std::result::Result<T, AnswerError>;

/// Errors that can occur while generating an answer.
///
/// These never reach the client: the service maps every failure from
/// the external model to a fixed fallback message.
#[derive(Error, Debug)]
pub enum AnswerError {
    /// Model not configured.
    #[error("answer model not configured")]
    ModelNotConfigured,

    /// API request failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// Invalid response from the model.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}
