// ABOUTME: Request ID middleware for correlating logs with HTTP requests
// ABOUTME: Reuses a client-supplied x-request-id or generates a UUID, and echoes it on the response
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use axum::{extract::Request, middleware::Next, response::Response};
use http::HeaderValue;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::constants::network::REQUEST_ID_HEADER;

/// Longest client-supplied request ID that is reused as-is
const MAX_REQUEST_ID_LENGTH: usize = 128;

/// Request ID attached to every request as an extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a fresh random ID
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The ID as text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_header(value: &HeaderValue) -> Option<Self> {
        let text = value.to_str().ok()?.trim();
        (!text.is_empty() && text.len() <= MAX_REQUEST_ID_LENGTH).then(|| Self(text.to_owned()))
    }
}

/// Attach a [`RequestId`], run the rest of the stack inside a span carrying it,
/// and set the `x-request-id` response header
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(RequestId::from_header)
        .unwrap_or_else(RequestId::generate);

    let span = info_span!(
        "http_request",
        request_id = %request_id.as_str(),
        method = %request.method(),
        path = %request.uri().path(),
    );

    request.extensions_mut().insert(request_id.clone());

    let mut response = next.run(request).instrument(span.clone()).await;

    span.in_scope(|| info!(status = response.status().as_u16(), "Request completed"));

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
