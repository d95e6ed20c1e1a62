//! Configuration for the retrieval engine.

use serde::{Deserialize, Serialize};

/// Configuration for the retrieval engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of passages returned by semantic search.
    pub semantic_k: usize,

    /// Number of passages returned by keyword search.
    ///
    /// Keyword scores are coarser than cosine similarities, so the
    /// fallback casts a wider net.
    pub keyword_k: usize,
}

impl RetrievalConfig {
    /// Set the semantic result count.
    pub fn with_semantic_k(mut self, k: usize) -> Self {
        self.semantic_k = k;
        self
    }

    /// Set the keyword result count.
    pub fn with_keyword_k(mut self, k: usize) -> Self {
        self.keyword_k = k;
        self
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            semantic_k: 5,
            keyword_k: 10,
        }
    }
}
