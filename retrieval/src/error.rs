//! Error types for the retrieval engine.

use thiserror::Error;

/// Result type alias for retrieval operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;

/// Errors that can occur in the retrieval engine.
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// Embedding error.
    #[error("embedding error: {0}")]
    Embedding(#[from] yardstick_embeddings::EmbeddingError),

    /// Corpus file could not be parsed.
    #[error("corpus parse error: {0}")]
    CorpusParse(#[from] serde_json::Error),

    /// Embeddings do not line up with the documents.
    #[error("corpus misaligned: {documents} documents but {embeddings} embeddings")]
    CorpusMisaligned {
        documents: usize,
        embeddings: usize,
    },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
