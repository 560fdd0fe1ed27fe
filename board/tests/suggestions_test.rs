use board::{Board, GeminiSuggestionProvider, SuggestionError, SuggestionProvider};
use config::{Config, SuggestionConfig};
use serde_json::json;
use std::sync::Arc;
use storage::InMemoryAdapter;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn provider(server: &MockServer) -> GeminiSuggestionProvider {
    GeminiSuggestionProvider::new(&SuggestionConfig {
        endpoint: server.uri(),
        api_key: Some("test-key".to_string()),
        ..SuggestionConfig::default()
    })
    .unwrap()
}

fn generated(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]}
        }]
    })
}

#[tokio::test]
async fn test_suggest_parses_model_output() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "generationConfig": {"responseMimeType": "application/json"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(generated(
            "```json\n{\"suggestions\": [\
             {\"title\": \"Inventory Turnover\", \"group\": \"Financial Reports\"},\
             {\"title\": \"Stock Aging\", \"group\": \"Financial Reports\"}]}\n```"
        )))
        .expect(1)
        .mount(&server)
        .await;

    let items = provider(&server).suggest("inventory").await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, "Inventory Turnover");
    assert!(items.iter().all(|i| utils::is_suggestion_id(&i.id)));
    assert!(items.iter().all(|i| i.has_placeholder_links()));
}

#[tokio::test]
async fn test_suggest_caps_results() {
    let server = MockServer::start().await;
    let entries: Vec<_> = (0..6)
        .map(|i| json!({"title": format!("Report {i}"), "group": "Sales Reports"}))
        .collect();
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(generated(&json!({ "suggestions": entries }).to_string()))
        )
        .mount(&server)
        .await;

    assert_eq!(provider(&server).suggest("report").await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_error_status_surfaces() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("RESOURCE_EXHAUSTED"))
        .mount(&server)
        .await;

    let err = provider(&server).suggest("inventory").await.unwrap_err();
    match err {
        SuggestionError::Status { status, body } => {
            assert_eq!(status, 429);
            assert!(body.contains("RESOURCE_EXHAUSTED"));
        }
        other => panic!("expected status error, got {other:?}")
    }
}

#[tokio::test]
async fn test_board_swallows_provider_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(generated("not json")))
        .mount(&server)
        .await;

    let mut config = Config::default();
    config.observability.metrics_enabled = false;
    let board = Board::from_config(&config, Arc::new(InMemoryAdapter::new()));
    board.initialize().await;

    let provider = provider(&server);
    assert!(matches!(
        provider.suggest("inventory").await,
        Err(SuggestionError::Malformed(_))
    ));
    assert!(board.suggest(&provider, "inventory").await.is_empty());
}
