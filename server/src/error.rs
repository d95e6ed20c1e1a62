//! Request-level error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// An error that becomes an HTTP error response.
///
/// Only malformed requests and genuinely unexpected failures reach the
/// client as errors; retrieval and generation failures are absorbed by
/// the answer service and still return 200 with fallback text.
#[derive(Debug)]
pub enum ApiError {
    /// Client sent something unusable; the message says what.
    BadRequest(&'static str),

    /// Anything unexpected. Logged at the boundary, opaque to the client.
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server error. Please try again.",
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
