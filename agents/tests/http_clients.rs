//! HTTP-level tests for the Ollama and Tavily clients against a mock server

use std::time::Duration;

use agents::{
    AgentError, Embedder, LanguageModel, OllamaClient, OllamaConfig, SearchDepth, TavilyClient, TavilyConfig,
    WebSearch,
};
use serde_json::json;
use shared::Stage;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ollama_config(server: &MockServer) -> OllamaConfig {
    OllamaConfig {
        base_url: server.uri(),
        timeout: Duration::from_millis(300),
        ..OllamaConfig::default()
    }
}

fn tavily_config(server: &MockServer) -> TavilyConfig {
    TavilyConfig {
        base_url: server.uri(),
        search_depth: SearchDepth::Advanced,
        ..TavilyConfig::new("tvly-test-key")
    }
}

#[tokio::test]
async fn test_ollama_generate_returns_response_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({"model": "gemma:2b", "stream": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "gemma:2b",
            "response": "Fitness apps are growing.",
            "done": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OllamaClient::new(ollama_config(&server)).unwrap();
    let text = client.complete("research fitness").await.unwrap();
    assert_eq!(text, "Fitness apps are growing.");
}

#[tokio::test]
async fn test_ollama_clients_log_under_their_own_stage() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "ok"})))
        .expect(2)
        .mount(&server)
        .await;

    let base = OllamaClient::new(ollama_config(&server)).unwrap();
    assert_eq!(base.stage(), Stage::Orchestrator);

    let research = base.clone().with_stage(Stage::Research);
    let processing = base.with_stage(Stage::Processing);
    assert_eq!(research.stage(), Stage::Research);
    assert_eq!(processing.stage(), Stage::Processing);

    assert_eq!(research.complete("reason about fitness").await.unwrap(), "ok");
    assert_eq!(processing.complete("summarize fitness").await.unwrap(), "ok");
}

#[tokio::test]
async fn test_ollama_non_text_response_is_coerced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"output": "structured answer"}
        })))
        .mount(&server)
        .await;

    let client = OllamaClient::new(ollama_config(&server)).unwrap();
    assert_eq!(client.complete("q").await.unwrap(), "structured answer");
}

#[tokio::test]
async fn test_ollama_error_status_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model not loaded"))
        .mount(&server)
        .await;

    let client = OllamaClient::new(ollama_config(&server)).unwrap();
    match client.complete("q").await {
        Err(AgentError::ApiError { status, message, .. }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "model not loaded");
        }
        other => panic!("Expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_ollama_slow_response_is_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"response": "late"}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = OllamaClient::new(ollama_config(&server)).unwrap();
    let err = client.complete("q").await.unwrap_err();
    assert!(err.is_timeout(), "Expected timeout, got {err:?}");
}

#[tokio::test]
async fn test_ollama_embed_returns_one_vector_per_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/embed"))
        .and(body_partial_json(json!({"model": "nomic-embed-text"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "embeddings": [[0.1, 0.2], [0.3, 0.4]]
        })))
        .mount(&server)
        .await;

    let client = OllamaClient::new(ollama_config(&server)).unwrap();
    let vectors = client
        .embed(&["a".to_string(), "b".to_string()])
        .await
        .unwrap();
    assert_eq!(vectors.len(), 2);
    assert_eq!(vectors[1], vec![0.3, 0.4]);
}

#[tokio::test]
async fn test_ollama_embed_count_mismatch_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/embed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"embeddings": [[0.1]]})))
        .mount(&server)
        .await;

    let client = OllamaClient::new(ollama_config(&server)).unwrap();
    let result = client.embed(&["a".to_string(), "b".to_string()]).await;
    assert!(matches!(result, Err(AgentError::InvalidResponse { .. })));
}

#[tokio::test]
async fn test_tavily_search_sends_key_and_limits_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_partial_json(json!({
            "api_key": "tvly-test-key",
            "max_results": 2,
            "search_depth": "advanced"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": "fitness",
            "results": [
                {"title": "A", "url": "https://a.example", "content": "alpha", "score": 0.9},
                {"title": "B", "url": "https://b.example", "content": "beta", "score": 0.8},
                {"title": "C", "url": "https://c.example", "content": "gamma", "score": 0.7}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = TavilyClient::new(tavily_config(&server)).unwrap();
    let hits = client.search("fitness", 2).await.unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].title, "A");
    assert_eq!(hits[1].content, "beta");
}

#[tokio::test]
async fn test_tavily_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = TavilyClient::new(tavily_config(&server)).unwrap();
    assert!(matches!(
        client.search("fitness", 3).await,
        Err(AgentError::ApiError { status: 401, .. })
    ));
}

#[test]
fn test_tavily_requires_api_key() {
    assert!(matches!(
        TavilyClient::new(TavilyConfig::new("  ")),
        Err(AgentError::ConfigError { .. })
    ));
}
