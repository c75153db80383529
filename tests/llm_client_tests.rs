// Integration tests for the HTTP language-model client
//
// Tests cover:
// - OpenAI-compatible chat completions (auth header, JSON mode)
// - Ollama /api/chat
// - Non-success status codes and client-side timeouts

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use courtside::config::config::LlmConfig;
use courtside::error::AppError;
use courtside::llm::{HttpLlmClient, LlmClient, LlmProvider, parse_response, repair};
use courtside::models::classification::QueryCategory;

fn config(provider: &str, base_url: &str) -> LlmConfig {
    LlmConfig {
        provider: provider.into(),
        base_url: base_url.into(),
        api_key: Some("test-key".into()),
        model: "test-model".into(),
        timeout_ms: 500,
    }
}

#[tokio::test]
async fn test_openai_chat_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "response_format": {"type": "json_object"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": {"role": "assistant", "content": "{\"category\": \"INJURY_NEWS\", \"confidence\": 0.8}"}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpLlmClient::new(&config("openai", &server.uri()), LlmProvider::OpenAi).unwrap();
    let text = client.complete("system", "is lebron hurt").await.unwrap();
    let result = repair(&parse_response(&text).unwrap());
    assert_eq!(result.category, QueryCategory::InjuryNews);
}

#[tokio::test]
async fn test_ollama_chat() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({"stream": false, "format": "json"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "test-model",
            "message": {"role": "assistant", "content": "{\"category\": \"SCHEDULE\"}"},
            "done": true
        })))
        .mount(&server)
        .await;

    let base = format!("{}/", server.uri());
    let client = HttpLlmClient::new(&config("ollama", &base), LlmProvider::Ollama).unwrap();
    let text = client.complete("system", "when do the bulls play").await.unwrap();
    assert!(text.contains("SCHEDULE"));
}

#[tokio::test]
async fn test_error_status_is_llm_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let client = HttpLlmClient::new(&config("openai", &server.uri()), LlmProvider::OpenAi).unwrap();
    let err = client.complete("system", "q").await.unwrap_err();
    assert!(matches!(err, AppError::Llm(ref message) if message.contains("overloaded")));
}

#[tokio::test]
async fn test_empty_choices_is_llm_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let client = HttpLlmClient::new(&config("openai", &server.uri()), LlmProvider::OpenAi).unwrap();
    assert!(matches!(client.complete("system", "q").await, Err(AppError::Llm(_))));
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": {"content": "{}"}}))
                .set_delay(std::time::Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let mut config = config("ollama", &server.uri());
    config.timeout_ms = 100;
    let client = HttpLlmClient::new(&config, LlmProvider::Ollama).unwrap();
    assert!(matches!(client.complete("system", "q").await, Err(AppError::Timeout(_))));
}
