//! End-to-end tests against a bound listener, with the Gemini API
//! played by wiremock.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yardstick_answer::{
    AnswerService, GENERATION_FAILURE_MESSAGE, GeminiGenerator, NO_INFORMATION_MESSAGE,
};
use yardstick_embeddings::GeminiEmbedder;
use yardstick_retrieval::{DocumentStore, RetrievalConfig, Retriever};
use yardstick_server::AppState;

const PRICING_CORPUS: &[&str] = &[
    "Yardstick offers AI chat services",
    "Contact us for pricing",
];

/// Bind the app on an ephemeral port, pointing both Gemini clients at
/// the mock server. Returns the base URL.
async fn spawn_app(
    documents: &[&str],
    embeddings: Option<Vec<Vec<f32>>>,
    gemini: &MockServer,
) -> String {
    let store = DocumentStore::new(
        documents.iter().map(|s| s.to_string()).collect(),
        embeddings,
    )
    .unwrap();

    let embedder = GeminiEmbedder::new()
        .with_api_key("test-key")
        .with_base_url(gemini.uri());
    let generator = GeminiGenerator::new()
        .with_api_key("test-key")
        .with_base_url(gemini.uri());

    let retriever = Retriever::new(
        Arc::new(store),
        Arc::new(embedder),
        RetrievalConfig::default(),
    );
    let service = AnswerService::new(retriever, Arc::new(generator));
    let state = AppState::new(service);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(yardstick_server::serve(listener, state));

    format!("http://{addr}")
}

/// Mount a successful generateContent response.
async fn mount_generation(gemini: &MockServer, answer: &str) {
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": answer }] }
            }]
        })))
        .mount(gemini)
        .await;
}

async fn post_chat(base: &str, body: serde_json::Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{base}/api/chat"))
        .json(&body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn ping_returns_pong() {
    let gemini = MockServer::start().await;
    let base = spawn_app(PRICING_CORPUS, None, &gemini).await;

    let response = reqwest::get(format!("{base}/ping")).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "pong");
}

#[tokio::test]
async fn home_serves_chat_page() {
    let gemini = MockServer::start().await;
    let base = spawn_app(PRICING_CORPUS, None, &gemini).await;

    let response = reqwest::get(&base).await.unwrap();
    assert_eq!(response.status(), 200);
    assert!(response.text().await.unwrap().contains("Yardstick AI Assistant"));
}

#[tokio::test]
async fn health_reports_corpus_state() {
    let gemini = MockServer::start().await;
    let base = spawn_app(PRICING_CORPUS, None, &gemini).await;

    let response = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "alive");
    assert_eq!(body["docs_loaded"], true);
    assert_eq!(body["embeddings_loaded"], false);
    assert_eq!(body["cache_size"], 0);
    assert!(body["timestamp"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn chat_answers_from_keyword_retrieval() {
    let gemini = MockServer::start().await;
    mount_generation(&gemini, "Pricing depends on your needs.").await;
    let base = spawn_app(PRICING_CORPUS, None, &gemini).await;

    let response = post_chat(&base, serde_json::json!({ "question": "pricing" })).await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["answer"], "Pricing depends on your needs.");
}

#[tokio::test]
async fn chat_rejects_empty_question() {
    let gemini = MockServer::start().await;
    let base = spawn_app(PRICING_CORPUS, None, &gemini).await;

    let response = post_chat(&base, serde_json::json!({ "question": "" })).await;
    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "No question provided");
}

#[tokio::test]
async fn chat_rejects_overlong_question() {
    let gemini = MockServer::start().await;
    let base = spawn_app(PRICING_CORPUS, None, &gemini).await;

    let question = "x".repeat(600);
    let response = post_chat(&base, serde_json::json!({ "question": question })).await;
    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Question too long (max 500 chars)");
}

#[tokio::test]
async fn chat_rejects_malformed_body() {
    let gemini = MockServer::start().await;
    let base = spawn_app(PRICING_CORPUS, None, &gemini).await;

    let response = post_chat(&base, serde_json::json!({ "nope": 1 })).await;
    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid request");
}

#[tokio::test]
async fn chat_returns_no_information_for_empty_corpus() {
    let gemini = MockServer::start().await;
    let base = spawn_app(&[], None, &gemini).await;

    let response = post_chat(&base, serde_json::json!({ "question": "anything" })).await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["answer"], NO_INFORMATION_MESSAGE);

    // Fallback text is never cached.
    let health: serde_json::Value = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["cache_size"], 0);
}

#[tokio::test]
async fn chat_survives_generation_outage() {
    let gemini = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&gemini)
        .await;
    let base = spawn_app(PRICING_CORPUS, None, &gemini).await;

    let response = post_chat(&base, serde_json::json!({ "question": "pricing" })).await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["answer"], GENERATION_FAILURE_MESSAGE);
}

#[tokio::test]
async fn chat_falls_back_to_keywords_when_embedding_fails() {
    let gemini = MockServer::start().await;
    // Embedding endpoint is down, generation works.
    Mock::given(method("POST"))
        .and(path("/models/text-embedding-004:embedContent"))
        .respond_with(ResponseTemplate::new(500).set_body_string("down"))
        .mount(&gemini)
        .await;
    mount_generation(&gemini, "Contact our team for a quote.").await;

    let embeddings = Some(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    let base = spawn_app(PRICING_CORPUS, embeddings, &gemini).await;

    let response = post_chat(&base, serde_json::json!({ "question": "pricing" })).await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["answer"], "Contact our team for a quote.");
}

#[tokio::test]
async fn chat_is_rate_limited_per_minute() {
    let gemini = MockServer::start().await;
    mount_generation(&gemini, "An answer.").await;
    let base = spawn_app(PRICING_CORPUS, None, &gemini).await;

    for _ in 0..10 {
        let response = post_chat(&base, serde_json::json!({ "question": "pricing" })).await;
        assert_eq!(response.status(), 200);
    }

    let response = post_chat(&base, serde_json::json!({ "question": "pricing" })).await;
    assert_eq!(response.status(), 429);
}

#[tokio::test]
async fn repeated_question_is_served_from_cache() {
    let gemini = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Cached answer." }] }
            }]
        })))
        .expect(1)
        .mount(&gemini)
        .await;
    let base = spawn_app(PRICING_CORPUS, None, &gemini).await;

    let first = post_chat(&base, serde_json::json!({ "question": "What is the pricing?" })).await;
    assert_eq!(first.status(), 200);

    // Different casing and whitespace, same cache entry, no second
    // upstream call (the mock expects exactly one).
    let second =
        post_chat(&base, serde_json::json!({ "question": "  WHAT IS THE PRICING?  " })).await;
    let body: serde_json::Value = second.json().await.unwrap();
    assert_eq!(body["answer"], "Cached answer.");
}
