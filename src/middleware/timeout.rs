// ABOUTME: Request deadline middleware for the HTTP stack
// ABOUTME: Answers requests that outlive the deadline with the standard JSON error envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use std::time::Duration;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::errors::{AppError, ErrorCode};

/// Run the rest of the stack, giving up after `deadline`
pub async fn timeout_middleware(
    State(deadline): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();

    match tokio::time::timeout(deadline, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            warn!(%path, deadline_secs = deadline.as_secs(), "Request exceeded deadline");
            AppError::new(
                ErrorCode::RequestTimeout,
                format!("Request did not complete within {} seconds", deadline.as_secs()),
            )
            .into_response()
        }
    }
}
