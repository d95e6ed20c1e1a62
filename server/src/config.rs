//! Server configuration from the environment.

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Configuration read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Gemini API key. Required: the process refuses to start without
    /// it rather than failing lazily on the first request.
    pub api_key: String,

    /// Port to bind on `0.0.0.0`.
    pub port: u16,

    /// Path to the documents file (JSON array of strings).
    pub docs_path: PathBuf,

    /// Path to the aligned embeddings file. May be absent on disk;
    /// that downgrades retrieval to keyword search.
    pub embeddings_path: PathBuf,
}

impl ServerConfig {
    /// Read configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .context("GEMINI_API_KEY must be set")?;

        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().context("PORT must be a valid port number")?,
            Err(_) => 5000,
        };

        let docs_path = std::env::var("YARDSTICK_DOCS_PATH")
            .map_or_else(|_| PathBuf::from("yardstick_docs.json"), PathBuf::from);

        let embeddings_path = std::env::var("YARDSTICK_EMBEDDINGS_PATH")
            .map_or_else(|_| PathBuf::from("yardstick_embeddings.json"), PathBuf::from);

        Ok(Self {
            api_key,
            port,
            docs_path,
            embeddings_path,
        })
    }
}
