// ABOUTME: Configuration management module for server settings
// ABOUTME: Loads environment-driven server, database, CORS, and LLM configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! Configuration module for the FitPlan server
//!
//! - **Environment**: Server configuration from environment variables
//! - **Types**: Shared enums such as the LLM provider selector

/// Environment and server configuration
pub mod environment;
/// Shared configuration types
pub mod types;

pub use environment::{CorsConfig, DatabaseConfig, DatabaseUrl, LlmConfig, ServerConfig};
pub use types::LlmProviderType;
