//! Integration tests for the LLM-proxy wrappers against a mock backend.

use fablab_client::{ApiClient, ClientConfig};
use fablab_core::{
    AssistBackend, ChatMessage, ChatRole, Error, LanguageTag, SourceKind, SummaryInput,
};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&ClientConfig {
        base_url: server.uri(),
        ..Default::default()
    })
}

fn input(id: &str, kind: SourceKind) -> SummaryInput {
    SummaryInput {
        id: id.to_string(),
        title: format!("Source {id}"),
        kind,
        content: format!("content of {id}"),
        selected: true,
    }
}

fn analysis(title: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "type": "text",
        "summary": "A short synthesis.",
        "keyTopics": ["topic"],
        "suggestedQuestions": ["What next?"]
    })
}

#[tokio::test]
async fn test_source_summary_round_trip() {
    let mock_server = MockServer::start().await;

    let body = serde_json::json!({
        "globalOverview": "Both sources discuss Rust.",
        "sourcesAnalysis": [analysis("Source a"), analysis("Source b")]
    });

    Mock::given(method("POST"))
        .and(path("/api/v1/gemini/source-summary"))
        .and(body_partial_json(serde_json::json!({"language": "pt-BR"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let sources = vec![input("a", SourceKind::Text), input("b", SourceKind::Pdf)];
    let language: LanguageTag = "pt-BR".parse().unwrap();

    let summary = client
        .source_summary(&sources, &language)
        .await
        .expect("summary failed");

    assert_eq!(summary.global_overview, "Both sources discuss Rust.");
    assert_eq!(summary.sources_analysis.len(), 2);
}

#[tokio::test]
async fn test_source_summary_length_mismatch_is_rejected() {
    let mock_server = MockServer::start().await;

    // One analysis for two input sources violates the per-source contract.
    let body = serde_json::json!({
        "globalOverview": "Partial.",
        "sourcesAnalysis": [analysis("Source a")]
    });

    Mock::given(method("POST"))
        .and(path("/api/v1/gemini/source-summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let sources = vec![input("a", SourceKind::Text), input("b", SourceKind::Text)];

    let err = client
        .source_summary(&sources, &LanguageTag::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Summary(_)));
}

#[tokio::test]
async fn test_source_summary_backend_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/gemini/source-summary"))
        .respond_with(ResponseTemplate::new(502).set_body_string("proxy unavailable"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let sources = vec![input("a", SourceKind::Text)];

    let err = client
        .source_summary(&sources, &LanguageTag::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Backend { status: 502, .. }));
    // expect(1) on the mock asserts exactly one attempt went out.
}

#[tokio::test]
async fn test_chat_sends_history_and_returns_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/gemini/chat"))
        .and(body_partial_json(serde_json::json!({
            "message": "And the second source?",
            "language": "en",
            "history": [
                {"role": "user", "content": "Summarize the first source."},
                {"role": "model", "content": "It covers ownership."}
            ]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"response": "It covers borrowing."})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let history = vec![
        ChatMessage::new(ChatRole::User, "Summarize the first source."),
        ChatMessage::new(ChatRole::Model, "It covers ownership."),
    ];
    let sources = vec![input("a", SourceKind::Pdf)];

    let reply = client
        .chat(
            &history,
            &sources,
            "And the second source?",
            &LanguageTag::default(),
        )
        .await
        .expect("chat failed");

    assert_eq!(reply, "It covers borrowing.");
}

#[tokio::test]
async fn test_chat_backend_error_surfaces() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/gemini/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model crashed"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let sources = vec![input("a", SourceKind::Text)];

    let err = client
        .chat(&[], &sources, "hello", &LanguageTag::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Backend { status: 500, .. }));
}
