// ABOUTME: HTTP middleware for request correlation and cross-origin access
// ABOUTME: Provides request ID propagation, request deadlines, and the CORS layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

/// CORS configuration
pub mod cors;
/// Request ID generation and propagation
pub mod request_id;
/// Request deadline enforcement
pub mod timeout;

pub use cors::setup_cors;
pub use request_id::{request_id_middleware, RequestId};
pub use timeout::timeout_middleware;
