//! # Embeddings
//!
//! Embedding generation and similarity scoring for the Yardstick chat
//! backend.
//!
//! The retrieval path embeds the incoming question through the Gemini
//! `embedContent` API and ranks the corpus by cosine similarity against
//! precomputed document embeddings. When the provider is unreachable the
//! caller is expected to fall back to keyword search, so every failure
//! here is surfaced as a typed error rather than a panic.

pub mod error;
pub mod provider;
pub mod similarity;

pub use error::{EmbeddingError, Result};
pub use provider::{EmbeddingProvider, EmbeddingTask, GeminiEmbedder};
pub use similarity::cosine_similarity;

/// A dense vector embedding.
pub type Embedding = Vec<f32>;

/// Dimension produced by the default Gemini embedding model.
pub const DEFAULT_DIMENSION: usize = 768; // text-embedding-004
