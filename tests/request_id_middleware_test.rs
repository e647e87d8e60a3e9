// ABOUTME: Tests for the request ID middleware
// ABOUTME: Verifies ID generation, reuse of client IDs, and extension availability to handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use axum::{middleware, routing::get, Extension, Router};
use fitplan_server::middleware::{request_id_middleware, RequestId};
use helpers::axum_test::AxumTestRequest;
use uuid::Uuid;

async fn echo_request_id(Extension(request_id): Extension<RequestId>) -> String {
    request_id.as_str().to_owned()
}

fn app() -> Router {
    Router::new()
        .route("/echo", get(echo_request_id))
        .layer(middleware::from_fn(request_id_middleware))
}

#[tokio::test]
async fn test_generates_uuid_when_header_absent() {
    let response = AxumTestRequest::get("/echo").send(app()).await;
    assert_eq!(response.status(), 200);

    let header = response.header("x-request-id").unwrap().to_owned();
    assert!(Uuid::parse_str(&header).is_ok());

    let body: String = response.text();
    assert_eq!(body, header);
}

#[tokio::test]
async fn test_reuses_client_request_id() {
    let response = AxumTestRequest::get("/echo")
        .header("x-request-id", "client-req-42")
        .send(app())
        .await;

    assert_eq!(response.header("x-request-id"), Some("client-req-42"));
    assert_eq!(response.text(), "client-req-42");
}

#[tokio::test]
async fn test_oversized_client_id_is_replaced() {
    let oversized = "x".repeat(200);
    let response = AxumTestRequest::get("/echo")
        .header("x-request-id", &oversized)
        .send(app())
        .await;

    let header = response.header("x-request-id").unwrap();
    assert_ne!(header, oversized);
    assert!(Uuid::parse_str(header).is_ok());
}

#[tokio::test]
async fn test_header_set_on_not_found() {
    let response = AxumTestRequest::get("/missing").send(app()).await;
    assert_eq!(response.status(), 404);
    assert!(response.header("x-request-id").is_some());
}

#[test]
fn test_generated_ids_are_unique() {
    assert_ne!(RequestId::generate(), RequestId::generate());
}
