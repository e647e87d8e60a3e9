// ABOUTME: LLM provider abstraction layer for pluggable text generation backends
// ABOUTME: Defines the contract for LLM providers (Gemini, OpenAI-compatible) used by the generators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! # LLM Provider Interface
//!
//! This module defines the contract that LLM providers implement so the option and
//! plan generators can prompt any backend the same way.
//!
//! ## Key Concepts
//!
//! - **`LlmCapabilities`**: Bitflags describing provider features (JSON mode, system messages)
//! - **`LlmProvider`**: Async trait for chat completion
//! - **`ChatMessage`**: Role-based message structure for conversations
//! - **`ChatRequest`**: Request configuration including model, temperature, JSON mode
//!
//! ## Example: Using a Provider
//!
//! ```rust,no_run
//! use fitplan_server::llm::{ChatMessage, ChatRequest, LlmProvider};
//!
//! async fn example(provider: &dyn LlmProvider) {
//!     let request = ChatRequest::new(vec![
//!         ChatMessage::system("You are a certified personal trainer."),
//!         ChatMessage::user("Suggest three warm-up exercises."),
//!     ])
//!     .with_json_response();
//!     let response = provider.complete(&request).await;
//! }
//! ```

mod gemini;
mod openai_compatible;
mod provider;

pub use gemini::{GeminiProvider, DEFAULT_MODEL as GEMINI_DEFAULT_MODEL};
pub use openai_compatible::{
    LocalBackend, OpenAiCompatibleConfig, OpenAiCompatibleProvider,
    DEFAULT_BASE_URL as LOCAL_DEFAULT_BASE_URL, DEFAULT_MODEL as LOCAL_DEFAULT_MODEL,
};
pub use provider::ChatProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

// ============================================================================
// Capability Flags
// ============================================================================

bitflags::bitflags! {
    /// LLM provider capability flags
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LlmCapabilities: u8 {
        /// Provider can be asked to reply with a JSON document only
        const JSON_MODE = 0b0000_0001;
        /// Provider supports system messages
        const SYSTEM_MESSAGES = 0b0000_0010;
    }
}

impl LlmCapabilities {
    /// Capabilities for a provider that only understands plain chat
    #[must_use]
    pub const fn text_only() -> Self {
        Self::SYSTEM_MESSAGES
    }

    /// Capabilities for a provider with native JSON output
    #[must_use]
    pub const fn structured_output() -> Self {
        Self::JSON_MODE.union(Self::SYSTEM_MESSAGES)
    }

    /// Check if JSON mode is supported
    #[must_use]
    pub const fn supports_json_mode(&self) -> bool {
        self.contains(Self::JSON_MODE)
    }

    /// Check if system messages are supported
    #[must_use]
    pub const fn supports_system_messages(&self) -> bool {
        self.contains(Self::SYSTEM_MESSAGES)
    }
}

// ============================================================================
// Message Types
// ============================================================================

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction message
    System,
    /// User input message
    User,
    /// Assistant response message
    Assistant,
}

impl MessageRole {
    /// Convert to string representation for API calls
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single message in a chat conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a new chat message
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Create an assistant message
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Configuration for a chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
    /// Model identifier (provider-specific)
    pub model: Option<String>,
    /// Temperature for response randomness (0.0 - 2.0)
    pub temperature: Option<f32>,
    /// Ask the provider for a bare JSON document
    pub json_response: bool,
}

impl ChatRequest {
    /// Create a new chat request with messages
    #[must_use]
    pub const fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            model: None,
            temperature: None,
            json_response: false,
        }
    }

    /// Set the model to use
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the model when one is configured
    #[must_use]
    pub fn with_optional_model(mut self, model: Option<&str>) -> Self {
        if let Some(model) = model {
            self.model = Some(model.to_owned());
        }
        self
    }

    /// Set the temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Request JSON output where the provider supports it
    #[must_use]
    pub const fn with_json_response(mut self) -> Self {
        self.json_response = true;
        self
    }
}

/// Response from a chat completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated message content
    pub content: String,
    /// Model used for generation
    pub model: String,
    /// Token usage statistics
    pub usage: Option<TokenUsage>,
    /// Finish reason (stop, length, etc.)
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: u32,
    /// Number of tokens in the completion
    pub completion_tokens: u32,
    /// Total tokens used
    pub total_tokens: u32,
}

// ============================================================================
// Provider Trait
// ============================================================================

/// LLM provider trait for chat completion
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Unique provider identifier (e.g., "gemini", "ollama")
    fn name(&self) -> &'static str;

    /// Human-readable display name for the provider
    fn display_name(&self) -> &'static str;

    /// Provider capabilities
    fn capabilities(&self) -> LlmCapabilities;

    /// Default model to use if not specified in request
    fn default_model(&self) -> &str;

    /// Perform a chat completion
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError>;

    /// Check if the provider is reachable and the credentials are accepted
    async fn health_check(&self) -> Result<bool, AppError>;
}

/// Extract a "retry in N seconds" hint from an upstream rate-limit message
///
/// Both Gemini ("Please retry in 6.4s") and `OpenAI`-style servers ("try again in 20s")
/// embed the delay in free text.
pub(crate) fn retry_after_seconds(message: &str) -> Option<u64> {
    let lower = message.to_lowercase();
    let start = ["retry in ", "try again in "]
        .iter()
        .find_map(|marker| lower.find(marker).map(|pos| pos + marker.len()))?;
    let tail = &lower[start..];
    let end = tail
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(tail.len());
    let seconds = tail[..end].parse::<f64>().ok()?;
    Some(seconds.ceil().max(0.0) as u64)
}

/// User-facing message for an upstream rate limit
pub(crate) fn rate_limit_message(upstream_message: &str) -> String {
    retry_after_seconds(upstream_message).map_or_else(
        || "AI service quota exceeded. Please wait a moment and try again.".to_owned(),
        |seconds| format!("AI service quota exceeded. Please try again in {seconds} seconds."),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_hint_parsing() {
        assert_eq!(
            retry_after_seconds("Quota exceeded. Please retry in 6.406453963s."),
            Some(7)
        );
        assert_eq!(
            retry_after_seconds("Rate limit reached, try again in 20s"),
            Some(20)
        );
        assert_eq!(retry_after_seconds("Slow down"), None);
    }

    #[test]
    fn test_rate_limit_message_falls_back() {
        assert!(rate_limit_message("nope").contains("wait a moment"));
        assert!(rate_limit_message("Please retry in 2s").contains("2 seconds"));
    }

    #[test]
    fn test_request_builder() {
        let request = ChatRequest::new(vec![ChatMessage::user("hi")])
            .with_optional_model(None)
            .with_temperature(0.4)
            .with_json_response();
        assert!(request.model.is_none());
        assert!(request.json_response);
        assert_eq!(request.temperature, Some(0.4));

        let request = request.with_optional_model(Some("gemini-2.0-flash-001"));
        assert_eq!(request.model.as_deref(), Some("gemini-2.0-flash-001"));
    }

    #[test]
    fn test_capabilities() {
        assert!(LlmCapabilities::structured_output().supports_json_mode());
        assert!(!LlmCapabilities::text_only().supports_json_mode());
        assert!(LlmCapabilities::text_only().supports_system_messages());
    }
}
