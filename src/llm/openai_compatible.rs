// ABOUTME: LLM provider for self-hosted servers that speak the OpenAI chat completions API
// ABOUTME: Targets Ollama, vLLM, and LocalAI, naming the backend after its well-known port
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! # Local LLM Provider
//!
//! Any server exposing `POST {base_url}/chat/completions` works. Selected with
//! `FITPLAN_LLM_PROVIDER=local` and configured through:
//!
//! - `LOCAL_LLM_BASE_URL` (default <http://localhost:11434/v1>, Ollama)
//! - `LOCAL_LLM_MODEL` (default `qwen2.5:14b-instruct`)
//! - `LOCAL_LLM_API_KEY` (optional bearer token)

use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use super::{
    rate_limit_message, ChatMessage, ChatRequest, ChatResponse, LlmCapabilities, LlmProvider,
    TokenUsage,
};
use crate::errors::{AppError, ErrorCode};

/// Default base URL (Ollama)
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434/v1";

/// Default model for local inference
pub const DEFAULT_MODEL: &str = "qwen2.5:14b-instruct";

/// Local servers may be loading a model when the first request arrives
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Service label used in error messages
const SERVICE: &str = "LocalLLM";

/// Longest body excerpt quoted in an error message
const BODY_EXCERPT_CHARS: usize = 200;

/// Which self-hosted server sits behind the base URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalBackend {
    /// Ollama, port 11434
    Ollama,
    /// vLLM, port 8000
    Vllm,
    /// `LocalAI`, port 8080
    LocalAi,
    /// Anything else
    Generic,
}

impl LocalBackend {
    /// Guess the backend from the port in `base_url`
    #[must_use]
    pub fn detect(base_url: &str) -> Self {
        match Url::parse(base_url).ok().and_then(|url| url.port()) {
            Some(11434) => Self::Ollama,
            Some(8000) => Self::Vllm,
            Some(8080) => Self::LocalAi,
            _ => Self::Generic,
        }
    }

    /// Identifier used in logs
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::Vllm => "vllm",
            Self::LocalAi => "localai",
            Self::Generic => "local",
        }
    }

    /// Human-readable name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Ollama => "Ollama (Local)",
            Self::Vllm => "vLLM (Local)",
            Self::LocalAi => "LocalAI",
            Self::Generic => "Local LLM",
        }
    }
}

impl Display for LocalBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Connection settings for a local server
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleConfig {
    /// Base URL, up to and including the API version segment
    pub base_url: String,
    /// Bearer token, if the server wants one
    pub api_key: Option<String>,
    /// Model used when a request names none
    pub default_model: String,
    /// Detected backend
    pub backend: LocalBackend,
    /// Overall request timeout
    pub request_timeout: Duration,
}

impl OpenAiCompatibleConfig {
    /// Build settings for `base_url`; a blank API key counts as none
    #[must_use]
    pub fn for_endpoint(
        base_url: impl Into<String>,
        default_model: impl Into<String>,
        api_key: Option<String>,
        request_timeout: Duration,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            backend: LocalBackend::detect(&base_url),
            base_url,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            default_model: default_model.into(),
            request_timeout,
        }
    }
}

impl Default for OpenAiCompatibleConfig {
    fn default() -> Self {
        Self::for_endpoint(
            DEFAULT_BASE_URL,
            DEFAULT_MODEL,
            None,
            Duration::from_secs(300),
        )
    }
}

// Wire format

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a ChatMessage> for WireMessage<'a> {
    fn from(message: &'a ChatMessage) -> Self {
        Self {
            role: message.role.as_str(),
            content: &message.content,
        }
    }
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
    model: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

impl From<Usage> for TokenUsage {
    fn from(usage: Usage) -> Self {
        Self {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        }
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Map a non-success reply to an upstream error code
fn map_status(status: StatusCode, body: &str) -> AppError {
    let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) else {
        // Proxies and servers still loading a model answer with plain text or HTML
        return if matches!(status.as_u16(), 502..=504) {
            AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                "Local LLM server is not responding. Is Ollama/vLLM running?",
            )
        } else {
            let excerpt: String = body.chars().take(BODY_EXCERPT_CHARS).collect();
            AppError::external_service(SERVICE, format!("API error ({status}): {excerpt}"))
        };
    };

    let message = envelope.error.message;
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::new(
            ErrorCode::ExternalAuthFailed,
            format!("Local LLM rejected the credentials: {message}"),
        ),
        StatusCode::TOO_MANY_REQUESTS => {
            AppError::new(ErrorCode::ExternalRateLimited, rate_limit_message(&message))
        }
        StatusCode::SERVICE_UNAVAILABLE => AppError::new(
            ErrorCode::ExternalServiceUnavailable,
            format!("Local LLM is unavailable: {message}"),
        ),
        StatusCode::NOT_FOUND => {
            AppError::external_service(SERVICE, format!("Model or endpoint not found: {message}"))
        }
        _ => {
            let kind = envelope.error.kind.as_deref().unwrap_or("unknown");
            AppError::external_service(SERVICE, format!("{kind} - {message}"))
        }
    }
}

/// Chat completions client for a local server
pub struct OpenAiCompatibleProvider {
    client: Client,
    config: OpenAiCompatibleConfig,
}

impl OpenAiCompatibleProvider {
    /// Create a provider for `config`
    ///
    /// # Errors
    ///
    /// Returns an internal error if the HTTP client cannot be built.
    pub fn new(config: OpenAiCompatibleConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        info!(
            backend = config.backend.name(),
            base_url = %config.base_url,
            model = %config.default_model,
            "Initialized local LLM provider"
        );
        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    fn transport_error(&self, e: &reqwest::Error) -> AppError {
        error!(backend = self.config.backend.name(), error = %e, "Local LLM request failed");
        if e.is_connect() {
            AppError::external_service(
                SERVICE,
                format!(
                    "Cannot connect to {} at {}",
                    self.config.backend, self.config.base_url
                ),
            )
        } else if e.is_timeout() {
            AppError::external_service(SERVICE, "Request timed out")
        } else {
            AppError::external_service(SERVICE, format!("HTTP request failed: {e}"))
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        self.config.backend.name()
    }

    fn display_name(&self) -> &'static str {
        self.config.backend.display_name()
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::structured_output()
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(skip(self, request), fields(backend = self.config.backend.name()))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model);
        let json_mode = request.json_response && self.capabilities().supports_json_mode();

        let body = CompletionRequest {
            model,
            messages: request.messages.iter().map(WireMessage::from).collect(),
            temperature: request.temperature,
            stream: false,
            response_format: json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        debug!(model, messages = body.messages.len(), "Sending chat completion");
        let response = self
            .authorize(self.client.post(self.endpoint("chat/completions")).json(&body))
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))?;
        if !status.is_success() {
            warn!(status = %status, "Local LLM returned an error status");
            return Err(map_status(status, &text));
        }

        let parsed: CompletionResponse = serde_json::from_str(&text).map_err(|e| {
            AppError::external_service(SERVICE, format!("Malformed API response: {e}"))
        })?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::external_service(SERVICE, "API returned no choices"))?;
        let content = choice.message.content.unwrap_or_default();

        debug!(
            chars = content.len(),
            finish_reason = ?choice.finish_reason,
            "Received chat completion"
        );
        Ok(ChatResponse {
            content,
            model: parsed.model.unwrap_or_else(|| model.to_owned()),
            usage: parsed.usage.map(TokenUsage::from),
            finish_reason: choice.finish_reason,
        })
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, AppError> {
        let response = self
            .authorize(self.client.get(self.endpoint("models")))
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let healthy = response.status().is_success();
        if !healthy {
            warn!(status = %response.status(), "Local LLM health check failed");
        }
        Ok(healthy)
    }
}
