//! Per-IP request rate limiting.
//!
//! Fixed-window counters, entirely in process: a default budget of 30
//! requests per hour for every route, plus a tighter 10 per minute on
//! the chat endpoint. Windows live in a map behind an async lock so the
//! check-and-count is atomic across concurrent requests.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::{Duration, Instant};

use axum::Json;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tokio::sync::Mutex;
use tracing::warn;

use crate::state::AppState;

/// Default per-IP budget across all routes.
const DEFAULT_LIMIT: u32 = 30;
const DEFAULT_PERIOD: Duration = Duration::from_secs(60 * 60);

/// Tighter per-IP budget on the chat endpoint.
const CHAT_LIMIT: u32 = 10;
const CHAT_PERIOD: Duration = Duration::from_secs(60);

/// A fixed-window counter per IP.
struct FixedWindow {
    limit: u32,
    period: Duration,
    counts: HashMap<IpAddr, (Instant, u32)>,
}

impl FixedWindow {
    fn new(limit: u32, period: Duration) -> Self {
        Self {
            limit,
            period,
            counts: HashMap::new(),
        }
    }

    /// Count a request from `ip` at `now`; false means over budget.
    fn allow(&mut self, ip: IpAddr, now: Instant) -> bool {
        let entry = self.counts.entry(ip).or_insert((now, 0));

        if now.duration_since(entry.0) >= self.period {
            *entry = (now, 0);
        }

        if entry.1 >= self.limit {
            return false;
        }

        entry.1 += 1;
        true
    }
}

/// Per-IP limiter with a default window and a chat-specific window.
pub struct RateLimiter {
    default_window: Mutex<FixedWindow>,
    chat_window: Mutex<FixedWindow>,
}

impl RateLimiter {
    /// Create a limiter with the standard budgets (30/hour default,
    /// 10/minute on chat).
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_LIMIT, DEFAULT_PERIOD, CHAT_LIMIT, CHAT_PERIOD)
    }

    /// Create a limiter with explicit budgets.
    pub fn with_limits(
        default_limit: u32,
        default_period: Duration,
        chat_limit: u32,
        chat_period: Duration,
    ) -> Self {
        Self {
            default_window: Mutex::new(FixedWindow::new(default_limit, default_period)),
            chat_window: Mutex::new(FixedWindow::new(chat_limit, chat_period)),
        }
    }

    /// Whether a request from `ip` to `path` is within budget.
    pub async fn check(&self, ip: IpAddr, path: &str) -> bool {
        let now = Instant::now();

        if !self.default_window.lock().await.allow(ip, now) {
            return false;
        }

        if path == "/api/chat" && !self.chat_window.lock().await.allow(ip, now) {
            return false;
        }

        true
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

/// Middleware rejecting over-budget requests with 429.
pub async fn enforce(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    if !state.limiter.check(addr.ip(), &path).await {
        warn!("Rate limit exceeded for {} on {path}", addr.ip());
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": "Too many requests. Please slow down." })),
        )
            .into_response();
    }

    next.run(request).await
}
