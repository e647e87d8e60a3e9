// ABOUTME: HTTP-level tests for the OpenAI-compatible provider against a mock server
// ABOUTME: Covers JSON mode, bearer auth, and error mapping for local LLM servers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::time::Duration;

use fitplan_server::errors::ErrorCode;
use fitplan_server::llm::{
    ChatMessage, ChatRequest, LlmProvider, OpenAiCompatibleConfig, OpenAiCompatibleProvider,
};
use httpmock::prelude::*;
use serde_json::json;

fn provider(server: &MockServer, api_key: Option<&str>) -> OpenAiCompatibleProvider {
    let config = OpenAiCompatibleConfig::for_endpoint(
        server.url("/v1"),
        "qwen2.5:7b-instruct",
        api_key.map(ToOwned::to_owned),
        Duration::from_secs(5),
    );
    OpenAiCompatibleProvider::new(config).unwrap()
}

fn request() -> ChatRequest {
    ChatRequest::new(vec![
        ChatMessage::system("Reply with JSON."),
        ChatMessage::user("Plan please."),
    ])
    .with_json_response()
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "model": "qwen2.5:7b-instruct",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 9, "completion_tokens": 4, "total_tokens": 13 }
    })
}

#[tokio::test]
async fn test_complete_uses_json_mode_and_bearer_auth() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer local-secret")
                .json_body_partial(
                    r#"{
                        "model": "qwen2.5:7b-instruct",
                        "stream": false,
                        "response_format": { "type": "json_object" }
                    }"#,
                );
            then.status(200).json_body(completion("{\"weeks\": []}"));
        })
        .await;

    let response = provider(&server, Some("local-secret"))
        .complete(&request())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.content, "{\"weeks\": []}");
    assert_eq!(response.finish_reason.as_deref(), Some("stop"));
}

#[tokio::test]
async fn test_error_mapping() {
    for (status, body, expected) in [
        (401, json!({ "error": { "message": "bad key" } }).to_string(), ErrorCode::ExternalAuthFailed),
        (429, json!({ "error": { "message": "slow down" } }).to_string(), ErrorCode::ExternalRateLimited),
        (404, json!({ "error": { "message": "model missing" } }).to_string(), ErrorCode::ExternalServiceError),
        (503, json!({ "error": { "message": "loading" } }).to_string(), ErrorCode::ExternalServiceUnavailable),
        (502, "Bad Gateway".to_owned(), ErrorCode::ExternalServiceUnavailable),
        (500, "boom".to_owned(), ErrorCode::ExternalServiceError),
    ] {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(status).body(body.clone());
            })
            .await;

        let err = provider(&server, None).complete(&request()).await.unwrap_err();
        assert_eq!(err.code, expected, "status {status}");
    }
}

#[tokio::test]
async fn test_no_choices_is_external_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(json!({ "choices": [] }));
        })
        .await;

    let err = provider(&server, None).complete(&request()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceError);
}

#[tokio::test]
async fn test_health_check_lists_models() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/models");
            then.status(200).json_body(json!({ "data": [] }));
        })
        .await;

    let provider = provider(&server, None);
    assert!(provider.health_check().await.unwrap());
}
