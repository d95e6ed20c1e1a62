//! Read-only document store.
//!
//! The store holds the full corpus in memory: an ordered list of text
//! passages and, when available, one precomputed embedding per passage
//! aligned by index. It is built once at startup and never mutated, so
//! it can be shared across request handlers behind an `Arc` without a
//! lock.

use yardstick_embeddings::Embedding;

use crate::error::{Result, RetrievalError};

/// The fixed document corpus, with optional aligned embeddings.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    documents: Vec<String>,
    embeddings: Option<Vec<Embedding>>,
}

impl DocumentStore {
    /// Build a store from documents and optional embeddings.
    ///
    /// When embeddings are supplied, their count must equal the
    /// document count; a mismatch means the two corpus files are out of
    /// sync and is rejected outright.
    pub fn new(documents: Vec<String>, embeddings: Option<Vec<Embedding>>) -> Result<Self> {
        if let Some(ref embs) = embeddings {
            if embs.len() != documents.len() {
                return Err(RetrievalError::CorpusMisaligned {
                    documents: documents.len(),
                    embeddings: embs.len(),
                });
            }
        }

        Ok(Self {
            documents,
            embeddings,
        })
    }

    /// All documents, in load order.
    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    /// The document at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.documents.get(index).map(String::as_str)
    }

    /// Aligned embeddings, when the embeddings file was present.
    pub fn embeddings(&self) -> Option<&[Embedding]> {
        self.embeddings.as_deref()
    }

    /// Whether semantic search is possible against this store.
    pub fn has_embeddings(&self) -> bool {
        self.embeddings.is_some()
    }

    /// Number of documents in the corpus.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the corpus is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
