//! The answer service: one request, one state machine.

use std::sync::Arc;

use tracing::{debug, warn};
use yardstick_retrieval::Retriever;

use crate::cache::AnswerCache;
use crate::client::AnswerModel;
use crate::prompt::build_prompt;

/// Returned when retrieval finds nothing relevant. Not cached.
pub const NO_INFORMATION_MESSAGE: &str =
    "I don't have information about that. Please reach out to our team at \
     contact@yardstick.live and we'll be happy to help.";

/// Returned when the generation call fails. Not cached.
pub const GENERATION_FAILURE_MESSAGE: &str =
    "I'm having trouble processing your request. Please try again in a moment.";

/// Produces an answer string for every question, no matter what fails
/// underneath.
///
/// Per request: check the cache, retrieve passages, build the prompt,
/// call the model, cache the result. A cache hit short-circuits the
/// rest; an empty retrieval or a failed model call short-circuits to a
/// fixed fallback message that is never cached.
pub struct AnswerService {
    retriever: Retriever,
    model: Arc<dyn AnswerModel>,
    cache: AnswerCache,
}

impl AnswerService {
    /// Create a service over the given retriever and model.
    pub fn new(retriever: Retriever, model: Arc<dyn AnswerModel>) -> Self {
        Self {
            retriever,
            model,
            cache: AnswerCache::new(),
        }
    }

    /// Replace the default cache (used by tests to shrink capacity).
    pub fn with_cache(mut self, cache: AnswerCache) -> Self {
        self.cache = cache;
        self
    }

    /// The underlying retriever.
    pub fn retriever(&self) -> &Retriever {
        &self.retriever
    }

    /// Number of cached answers, for health reporting.
    pub async fn cache_size(&self) -> usize {
        self.cache.len().await
    }

    /// Answer a question. Always returns a string.
    pub async fn answer(&self, question: &str) -> String {
        if let Some(cached) = self.cache.get(question).await {
            debug!("Cache hit");
            return cached;
        }

        let passages = self.retriever.search(question).await;
        if passages.is_empty() {
            debug!("No relevant passages found");
            return NO_INFORMATION_MESSAGE.to_string();
        }

        let prompt = build_prompt(&passages, question);

        match self.model.generate(&prompt).await {
            Ok(text) => {
                let answer = text.trim().to_string();
                self.cache.put(question, answer.clone()).await;
                answer
            }
            Err(e) => {
                warn!("Generation failed: {e}");
                GENERATION_FAILURE_MESSAGE.to_string()
            }
        }
    }
}
