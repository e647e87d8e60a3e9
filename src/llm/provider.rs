// ABOUTME: Unified LLM provider selector built from server configuration
// ABOUTME: Wraps the Gemini and OpenAI-compatible providers behind one LlmProvider value
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! # LLM Provider Selector
//!
//! `FITPLAN_LLM_PROVIDER` picks the backend:
//! - `gemini` (default): Google Gemini, requires `GEMINI_API_KEY`
//! - `local`/`ollama`/`vllm`/`localai`: any `OpenAI`-compatible server

use std::fmt;

use async_trait::async_trait;
use tracing::info;

use super::{
    ChatRequest, ChatResponse, GeminiProvider, LlmCapabilities, LlmProvider,
    OpenAiCompatibleConfig, OpenAiCompatibleProvider,
};
use crate::config::{LlmConfig, LlmProviderType};
use crate::errors::AppError;

/// Chat provider selected at startup
pub enum ChatProvider {
    /// Google Gemini provider
    Gemini(GeminiProvider),
    /// Local LLM provider via `OpenAI`-compatible API (Ollama, vLLM, `LocalAI`)
    Local(OpenAiCompatibleProvider),
}

impl ChatProvider {
    /// Create the configured provider
    ///
    /// # Errors
    ///
    /// Returns a config error when Gemini is selected without an API key, or an
    /// internal error if the HTTP client cannot be built.
    pub fn from_config(config: &LlmConfig) -> Result<Self, AppError> {
        info!(
            "Initializing LLM provider: {} (set {} to change)",
            config.provider,
            LlmProviderType::ENV_VAR
        );

        let provider = match config.provider {
            LlmProviderType::Gemini => {
                let api_key = config.gemini_api_key.as_deref().ok_or_else(|| {
                    AppError::config("GEMINI_API_KEY environment variable not set")
                })?;
                Self::Gemini(
                    GeminiProvider::new(api_key, config.request_timeout())?
                        .with_default_model(&config.gemini_model),
                )
            }
            LlmProviderType::Local => Self::Local(OpenAiCompatibleProvider::new(
                OpenAiCompatibleConfig::for_endpoint(
                    &config.local_base_url,
                    &config.local_model,
                    config.local_api_key.clone(),
                    config.request_timeout(),
                ),
            )?),
        };

        info!(
            "Provider {} initialized with model: {}",
            provider.display_name(),
            provider.default_model()
        );
        Ok(provider)
    }

    /// Get the underlying provider as a trait object
    fn inner(&self) -> &dyn LlmProvider {
        match self {
            Self::Gemini(p) => p,
            Self::Local(p) => p,
        }
    }
}

#[async_trait]
impl LlmProvider for ChatProvider {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn display_name(&self) -> &'static str {
        self.inner().display_name()
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.inner().capabilities()
    }

    fn default_model(&self) -> &str {
        self.inner().default_model()
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        match self {
            Self::Gemini(p) => p.complete(request).await,
            Self::Local(p) => p.complete(request).await,
        }
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        match self {
            Self::Gemini(p) => p.health_check().await,
            Self::Local(p) => p.health_check().await,
        }
    }
}

impl fmt::Debug for ChatProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gemini(p) => f.debug_tuple("Gemini").field(p).finish(),
            Self::Local(p) => f
                .debug_tuple("Local")
                .field(&p.display_name())
                .finish(),
        }
    }
}
