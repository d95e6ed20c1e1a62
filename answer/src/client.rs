//! Generation model clients.
//!
//! The production client talks to the Gemini `generateContent` API.
//! The trait seam lets the answer service be tested with a canned
//! model.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::{AnswerError, Result};

/// Timeout applied to every generation request. A stalled upstream
/// turns into an ordinary failure instead of a hung request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Sampling temperature for answer generation.
const TEMPERATURE: f32 = 0.7;

/// Output length bound, in tokens.
const MAX_OUTPUT_TOKENS: u32 = 512;

/// Trait for generative answer models.
#[async_trait]
pub trait AnswerModel: Send + Sync {
    /// Get the name of this model client.
    fn name(&self) -> &str;

    /// Generate text for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Check if the model is available (API key set, etc.).
    fn is_available(&self) -> bool;
}

/// Gemini generation client.
pub struct GeminiGenerator {
    /// API key.
    api_key: Option<String>,

    /// API base URL.
    base_url: String,

    /// HTTP client.
    client: reqwest::Client,

    /// Model name.
    model: String,
}

impl GeminiGenerator {
    /// Create a new Gemini generator, reading the key from the environment.
    pub fn new() -> Self {
        Self {
            api_key: std::env::var("GEMINI_API_KEY").ok(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            model: "gemini-2.5-flash".to_string(),
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl Default for GeminiGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnswerModel for GeminiGenerator {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(AnswerError::ModelNotConfigured)?;

        let model = &self.model;
        debug!("Generating answer with model: {model}");

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": TEMPERATURE,
                "maxOutputTokens": MAX_OUTPUT_TOKENS,
            },
        });

        let response = self
            .client
            .post(format!(
                "{}/models/{model}:generateContent?key={api_key}",
                self.base_url
            ))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AnswerError::ApiRequest(format!(
                "API error: {error_text}"
            )));
        }

        let result: GeminiGenerateResponse = response.json().await?;

        let text = result
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| {
                AnswerError::InvalidResponse("no candidates in response".to_string())
            })?;

        Ok(text)
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Gemini API response format.
#[derive(Debug, Deserialize)]
struct GeminiGenerateResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: String,
}
