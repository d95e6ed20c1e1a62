//! Shared application state.

use std::sync::Arc;

use yardstick_answer::AnswerService;

use crate::rate_limit::RateLimiter;

/// State shared across all request handlers.
///
/// The answer service owns the read-only document store and the answer
/// cache; the limiter owns the per-IP request windows. Both are behind
/// `Arc` so the state clones cheaply per request.
#[derive(Clone)]
pub struct AppState {
    /// The question-answering pipeline.
    pub service: Arc<AnswerService>,

    /// Per-IP request limiter.
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Create state with the default rate limits.
    pub fn new(service: AnswerService) -> Self {
        Self {
            service: Arc::new(service),
            limiter: Arc::new(RateLimiter::new()),
        }
    }
}
