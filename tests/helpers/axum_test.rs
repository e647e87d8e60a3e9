// ABOUTME: In-process HTTP driver for exercising axum routers in integration tests
// ABOUTME: Builds requests fluently, sends them with oneshot, and buffers the response body
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use axum::body::{to_bytes, Body, Bytes};
use axum::http::{header, request, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde::{de::DeserializeOwned, Serialize};
use tower::ServiceExt;

/// A request under construction
pub struct AxumTestRequest {
    builder: request::Builder,
    body: Body,
}

impl AxumTestRequest {
    fn with_method(method: Method, uri: &str) -> Self {
        Self {
            builder: Request::builder().method(method).uri(uri),
            body: Body::empty(),
        }
    }

    /// GET `uri`
    pub fn get(uri: &str) -> Self {
        Self::with_method(Method::GET, uri)
    }

    /// POST `uri`
    #[allow(dead_code)]
    pub fn post(uri: &str) -> Self {
        Self::with_method(Method::POST, uri)
    }

    /// PUT `uri`
    #[allow(dead_code)]
    pub fn put(uri: &str) -> Self {
        Self::with_method(Method::PUT, uri)
    }

    /// Set a request header
    #[allow(dead_code)]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    /// Send `payload` serialized as JSON
    #[allow(dead_code)]
    pub fn json<T: Serialize>(self, payload: &T) -> Self {
        let text = serde_json::to_string(payload).expect("payload serializes");
        self.raw_json(&text)
    }

    /// Send `text` verbatim with a JSON content type, even when it is not valid JSON
    #[allow(dead_code)]
    pub fn raw_json(mut self, text: &str) -> Self {
        self.builder = self
            .builder
            .header(header::CONTENT_TYPE, "application/json");
        self.body = Body::from(text.to_owned());
        self
    }

    /// Run the request through `app` and buffer the reply
    pub async fn send(self, app: Router) -> AxumTestResponse {
        let request = self.builder.body(self.body).expect("valid test request");
        let response = app.oneshot(request).await.expect("router is infallible");

        let (parts, body) = response.into_parts();
        let body = to_bytes(body, usize::MAX)
            .await
            .expect("response body is readable");

        AxumTestResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }
}

/// A buffered response
pub struct AxumTestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl AxumTestResponse {
    /// Status code as a number
    pub const fn status(&self) -> u16 {
        self.status.as_u16()
    }

    /// Header value, if present and valid text
    #[allow(dead_code)]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Body as text
    #[allow(dead_code)]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body decoded from JSON
    #[allow(dead_code)]
    pub fn json<T: DeserializeOwned>(self) -> T {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }
}
