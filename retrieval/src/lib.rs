//! # Retrieval Engine
//!
//! This crate provides document retrieval for the Yardstick chat
//! backend:
//!
//! - **Document Store**: a fixed corpus of passages, loaded once at
//!   startup, with optional precomputed embeddings aligned by index
//! - **Semantic Search**: cosine similarity against the stored
//!   embeddings, with the query embedded through the Gemini API
//! - **Keyword Search**: substring-occurrence scoring used when
//!   embeddings are unavailable or the embedding call fails
//!
//! ## Usage
//!
//! ```rust,ignore
//! use yardstick_retrieval::{CorpusLoader, Retriever, RetrievalConfig};
//!
//! let store = CorpusLoader::new("yardstick_docs.json")
//!     .with_embeddings_path("yardstick_embeddings.json")
//!     .load()?;
//! let retriever = Retriever::new(store, provider, RetrievalConfig::default());
//!
//! let passages = retriever.search("What does Yardstick offer?").await;
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod keyword;
pub mod loader;
pub mod store;

pub use config::RetrievalConfig;
pub use engine::Retriever;
pub use error::{Result, RetrievalError};
pub use keyword::keyword_score;
pub use loader::CorpusLoader;
pub use store::DocumentStore;
