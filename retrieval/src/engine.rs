//! Retrieval engine implementation.

use std::sync::Arc;

use ordered_float::OrderedFloat;
use tracing::{debug, warn};
use yardstick_embeddings::{EmbeddingProvider, EmbeddingTask, cosine_similarity};

use crate::config::RetrievalConfig;
use crate::keyword::keyword_score;
use crate::store::DocumentStore;

/// Retrieves the most relevant corpus passages for a query.
///
/// Semantic search is preferred: the query is embedded through the
/// provider and ranked by cosine similarity against the precomputed
/// document embeddings. When the store has no embeddings, or the
/// embedding call fails for this request, retrieval degrades to keyword
/// search. Neither path can fail a request.
pub struct Retriever {
    store: Arc<DocumentStore>,
    provider: Arc<dyn EmbeddingProvider>,
    config: RetrievalConfig,
}

impl Retriever {
    /// Create a retriever over the given store and embedding provider.
    pub fn new(
        store: Arc<DocumentStore>,
        provider: Arc<dyn EmbeddingProvider>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            store,
            provider,
            config,
        }
    }

    /// The underlying document store.
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Retrieve the most relevant passages for `query`.
    ///
    /// Returns up to `semantic_k` passages when semantic search runs,
    /// up to `keyword_k` when it degrades to keyword search. An empty
    /// result means nothing in the corpus matched.
    pub async fn search(&self, query: &str) -> Vec<String> {
        let Some(doc_embeddings) = self.store.embeddings() else {
            return self.keyword_search(query);
        };

        let query_embedding = match self
            .provider
            .embed(query, EmbeddingTask::RetrievalQuery)
            .await
        {
            Ok(embedding) => embedding,
            Err(e) => {
                warn!("Embedding failed, falling back to keyword search: {e}");
                return self.keyword_search(query);
            }
        };

        let mut scored: Vec<(OrderedFloat<f32>, usize)> =
            Vec::with_capacity(doc_embeddings.len());
        for (i, doc_embedding) in doc_embeddings.iter().enumerate() {
            match cosine_similarity(&query_embedding, doc_embedding) {
                Ok(score) => scored.push((OrderedFloat(score), i)),
                Err(e) => {
                    // The corpus invariant guarantees uniform dimensions,
                    // so a mismatch means the query embedding came back
                    // in the wrong shape. Treat the whole call as failed.
                    warn!("Similarity failed, falling back to keyword search: {e}");
                    return self.keyword_search(query);
                }
            }
        }

        // Sort descending by score. No minimum threshold: weak matches
        // are still better context than none. Tie order is unspecified.
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        let results: Vec<String> = scored
            .into_iter()
            .take(self.config.semantic_k)
            .filter_map(|(_, i)| self.store.get(i).map(str::to_string))
            .collect();

        debug!("Semantic search returned {} passages", results.len());
        results
    }

    /// Retrieve passages by keyword overlap alone.
    ///
    /// Zero-scoring documents are never returned, so the result can be
    /// empty even for a non-empty corpus.
    pub fn keyword_search(&self, query: &str) -> Vec<String> {
        let mut scored: Vec<(u32, usize)> = self
            .store
            .documents()
            .iter()
            .enumerate()
            .filter_map(|(i, doc)| {
                let score = keyword_score(query, doc);
                (score > 0).then_some((score, i))
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));

        let results: Vec<String> = scored
            .into_iter()
            .take(self.config.keyword_k)
            .filter_map(|(_, i)| self.store.get(i).map(str::to_string))
            .collect();

        debug!("Keyword search returned {} passages", results.len());
        results
    }
}
