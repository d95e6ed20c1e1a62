//! Request handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Html;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::ApiError;
use crate::state::AppState;

/// Longest accepted question, in characters.
const MAX_QUESTION_CHARS: usize = 500;

/// The embedded chat page.
const CHAT_PAGE: &str = include_str!("chat.html");

/// Request body for `POST /api/chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

/// Response body for `POST /api/chat`.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
}

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub docs_loaded: bool,
    pub embeddings_loaded: bool,
    pub cache_size: usize,
    pub timestamp: String,
}

/// `GET /` — the chat page.
pub async fn home() -> Html<&'static str> {
    Html(CHAT_PAGE)
}

/// `GET /ping` — liveness probe.
pub async fn ping() -> &'static str {
    "pong"
}

/// `GET /health` — liveness plus corpus and cache state.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state.service.retriever().store();

    Json(HealthResponse {
        status: "alive",
        docs_loaded: !store.is_empty(),
        embeddings_loaded: store.has_embeddings(),
        cache_size: state.service.cache_size().await,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// `POST /api/chat` — answer a question.
///
/// Validation failures are the only client-visible errors here; the
/// answer service itself always produces a string, so a degraded
/// backend still returns 200 with fallback text.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Ok(Json(request)) = payload else {
        return Err(ApiError::BadRequest("Invalid request"));
    };

    let question = request.question.trim().to_string();
    if question.is_empty() {
        return Err(ApiError::BadRequest("No question provided"));
    }
    if question.chars().count() > MAX_QUESTION_CHARS {
        return Err(ApiError::BadRequest("Question too long (max 500 chars)"));
    }

    info!("Question: {question}");

    // Run the pipeline on its own task so a panic anywhere beneath it
    // becomes a 500 instead of a dropped connection.
    let service = Arc::clone(&state.service);
    let answer = tokio::task::spawn(async move { service.answer(&question).await })
        .await
        .map_err(|e| {
            error!("Answer pipeline failed: {e}");
            ApiError::Internal
        })?;

    info!("Answer: {:.100}", answer);

    Ok(Json(ChatResponse { answer }))
}
