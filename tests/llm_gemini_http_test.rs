// ABOUTME: HTTP-level tests for the Gemini provider against a mock server
// ABOUTME: Covers request shape, reply extraction, and upstream error code mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::time::Duration;

use fitplan_server::errors::{ErrorCode, ErrorResponse};
use fitplan_server::llm::{ChatMessage, ChatRequest, GeminiProvider, LlmProvider};
use httpmock::prelude::*;
use serde_json::json;

const API_KEY: &str = "test-gemini-key";
const MODEL: &str = "gemini-2.0-flash-001";

fn provider(server: &MockServer) -> GeminiProvider {
    GeminiProvider::new(API_KEY, Duration::from_secs(5))
        .unwrap()
        .with_default_model(MODEL)
        .with_base_url(server.base_url())
}

fn request() -> ChatRequest {
    ChatRequest::new(vec![
        ChatMessage::system("You are a fitness expert."),
        ChatMessage::user("Suggest options."),
    ])
    .with_temperature(0.7)
    .with_json_response()
}

fn generate_path() -> String {
    format!("/models/{MODEL}:generateContent")
}

#[tokio::test]
async fn test_complete_sends_system_instruction_and_json_mode() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(generate_path())
                .header("x-goog-api-key", API_KEY)
                .json_body_partial(
                    r#"{
                        "systemInstruction": { "parts": [{ "text": "You are a fitness expert." }] },
                        "contents": [{ "role": "user", "parts": [{ "text": "Suggest options." }] }],
                        "generationConfig": { "responseMimeType": "application/json" }
                    }"#,
                );
            then.status(200).json_body(json!({
                "candidates": [{
                    "content": { "role": "model", "parts": [{ "text": "{\"fitness_goals\": []}" }] },
                    "finishReason": "STOP"
                }],
                "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 5, "totalTokenCount": 17 }
            }));
        })
        .await;

    let response = provider(&server).complete(&request()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.content, "{\"fitness_goals\": []}");
    assert_eq!(response.model, MODEL);
    assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
    assert_eq!(response.usage.unwrap().total_tokens, 17);
}

#[tokio::test]
async fn test_request_model_overrides_default() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/models/gemini-2.5-flash:generateContent");
            then.status(200).json_body(json!({
                "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }]
            }));
        })
        .await;

    let response = provider(&server)
        .complete(&request().with_model("gemini-2.5-flash"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.model, "gemini-2.5-flash");
}

#[tokio::test]
async fn test_empty_candidate_is_invalid_shape() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(generate_path());
            then.status(200).json_body(json!({
                "candidates": [{ "content": { "parts": [] }, "finishReason": "SAFETY" }]
            }));
        })
        .await;

    let err = provider(&server).complete(&request()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidResponseShape);
    assert_eq!(err.details.unwrap()["finish_reason"], "SAFETY");
}

#[tokio::test]
async fn test_upstream_status_mapping() {
    for (status, expected) in [
        (429, ErrorCode::ExternalRateLimited),
        (401, ErrorCode::ExternalAuthFailed),
        (403, ErrorCode::ExternalAuthFailed),
        (503, ErrorCode::ExternalServiceUnavailable),
        (500, ErrorCode::ExternalServiceError),
        (400, ErrorCode::ExternalServiceError),
    ] {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(generate_path());
                then.status(status)
                    .json_body(json!({ "error": { "message": "upstream says no" } }));
            })
            .await;

        let err = provider(&server).complete(&request()).await.unwrap_err();
        assert_eq!(err.code, expected, "status {status}");
        if status != 429 {
            assert!(err.message.contains("upstream says no"), "{}", err.message);
        }
    }
}

#[tokio::test]
async fn test_non_json_body_is_external_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(generate_path());
            then.status(200).body("<html>proxy page</html>");
        })
        .await;

    let err = provider(&server).complete(&request()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceError);
}

#[tokio::test]
async fn test_connection_refused_is_external_error() {
    let provider = GeminiProvider::new(API_KEY, Duration::from_secs(2))
        .unwrap()
        .with_base_url("http://127.0.0.1:9");

    let err = provider.complete(&request()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    assert_eq!(err.http_status(), 502);
}

#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/models")
                .header("x-goog-api-key", API_KEY);
            then.status(200).json_body(json!({ "models": [] }));
        })
        .await;

    assert!(provider(&server).health_check().await.unwrap());
}

#[tokio::test]
async fn test_transport_errors_never_expose_api_key() {
    let secret = "AIza-never-leak-this-key";
    let provider = GeminiProvider::new(secret, Duration::from_secs(2))
        .unwrap()
        .with_base_url("http://127.0.0.1:1");

    let err = provider.complete(&request()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    assert!(!err.message.contains(secret));
    assert!(!err.to_string().contains(secret));

    let body = serde_json::to_string(&ErrorResponse::from(err)).unwrap();
    assert!(!body.contains(secret), "key leaked into error body: {body}");
}

#[tokio::test]
async fn test_api_key_is_not_sent_in_query() {
    let server = MockServer::start_async().await;
    let leaked = server
        .mock_async(|when, then| {
            when.method(POST).query_param_exists("key");
            then.status(500);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(generate_path())
                .header("x-goog-api-key", API_KEY);
            then.status(200).json_body(json!({
                "candidates": [{ "content": { "parts": [{ "text": "{}" }] } }]
            }));
        })
        .await;

    provider(&server).complete(&request()).await.unwrap();
    leaked.assert_hits_async(0).await;
}
