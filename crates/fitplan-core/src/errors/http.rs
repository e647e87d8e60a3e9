// ABOUTME: axum IntoResponse integration for AppError
// ABOUTME: Converts errors and JSON body rejections into JSON envelopes with mapped status codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use tracing::{error, warn};

use super::{AppError, ErrorResponse};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(
                code = ?self.code,
                status = status.as_u16(),
                source = ?self.source,
                "Request failed: {}",
                self.message
            );
        } else {
            warn!(
                code = ?self.code,
                status = status.as_u16(),
                "Request rejected: {}",
                self.message
            );
        }

        (status, Json(ErrorResponse::from(self))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid_input(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}
