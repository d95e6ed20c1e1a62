//! # Yardstick chat server
//!
//! The HTTP boundary of the assistant. Routes:
//!
//! - `GET /` — embedded chat page
//! - `GET /health` — liveness plus corpus/cache state
//! - `GET /ping` — plain `pong`
//! - `POST /api/chat` — the question/answer endpoint
//!
//! Everything interesting happens in `yardstick-retrieval` and
//! `yardstick-answer`; this crate validates requests, enforces per-IP
//! rate limits, and maps the service output to JSON.

use std::net::SocketAddr;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

pub mod config;
pub mod error;
pub mod rate_limit;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use state::AppState;

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::home))
        .route("/health", get(routes::health))
        .route("/ping", get(routes::ping))
        .route("/api/chat", post(routes::chat))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::enforce,
        ))
        .with_state(state)
}

/// Serve the router on the given listener until the process is stopped.
pub async fn serve(listener: tokio::net::TcpListener, state: AppState) -> std::io::Result<()> {
    let app = build_router(state);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
}
