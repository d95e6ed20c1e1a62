use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;
use yardstick_answer::{AnswerService, GeminiGenerator};
use yardstick_embeddings::GeminiEmbedder;
use yardstick_retrieval::{CorpusLoader, RetrievalConfig, Retriever};
use yardstick_server::{AppState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; a missing file is not an error.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    // Load the corpus exactly once, before accepting traffic.
    let store = CorpusLoader::new(&config.docs_path)
        .with_embeddings_path(&config.embeddings_path)
        .load()
        .with_context(|| format!("failed to load corpus from {}", config.docs_path.display()))?;

    info!(
        "Corpus ready: {} documents, embeddings {}",
        store.len(),
        if store.has_embeddings() {
            "loaded"
        } else {
            "unavailable (keyword search only)"
        }
    );

    let embedder = GeminiEmbedder::new().with_api_key(&config.api_key);
    let generator = GeminiGenerator::new().with_api_key(&config.api_key);

    let retriever = Retriever::new(
        Arc::new(store),
        Arc::new(embedder),
        RetrievalConfig::default(),
    );
    let service = AnswerService::new(retriever, Arc::new(generator));
    let state = AppState::new(service);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("Listening on {addr}");
    yardstick_server::serve(listener, state).await?;

    Ok(())
}
