//! Corpus loading from static JSON files.
//!
//! The loader reads the document list (a JSON array of strings) and
//! then attempts the aligned embeddings file (a JSON array of float
//! arrays). A missing embeddings file is not an error: the store simply
//! comes up in keyword-only mode for the life of the process. It is
//! kept separate from the engine so the retrieval core stays testable
//! with in-memory fixtures.

use std::path::{Path, PathBuf};

use tracing::{info, warn};
use yardstick_embeddings::Embedding;

use crate::error::Result;
use crate::store::DocumentStore;

/// Loads the document corpus from disk.
pub struct CorpusLoader {
    documents_path: PathBuf,
    embeddings_path: Option<PathBuf>,
}

impl CorpusLoader {
    /// Create a loader for the given documents file.
    pub fn new(documents_path: impl Into<PathBuf>) -> Self {
        Self {
            documents_path: documents_path.into(),
            embeddings_path: None,
        }
    }

    /// Set the embeddings file to attempt alongside the documents.
    pub fn with_embeddings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.embeddings_path = Some(path.into());
        self
    }

    /// Load the corpus.
    ///
    /// Fails when the documents file is missing or unparseable, or when
    /// a present embeddings file does not line up with the documents.
    pub fn load(&self) -> Result<DocumentStore> {
        let raw = std::fs::read_to_string(&self.documents_path)?;
        let documents: Vec<String> = serde_json::from_str(&raw)?;
        info!("Loaded {} documents", documents.len());

        let embeddings = match self.embeddings_path {
            Some(ref path) => Self::load_embeddings(path)?,
            None => None,
        };

        DocumentStore::new(documents, embeddings)
    }

    fn load_embeddings(path: &Path) -> Result<Option<Vec<Embedding>>> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("No embeddings file found, using keyword search");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let embeddings: Vec<Embedding> = serde_json::from_str(&raw)?;
        info!("Loaded {} document embeddings", embeddings.len());
        Ok(Some(embeddings))
    }
}
