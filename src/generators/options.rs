// ABOUTME: LLM-backed option generator prompting a provider for personalized fitness options
// ABOUTME: Sends the options prompt in JSON mode and parses the reply into an OptionSet
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use super::json::parse_reply;
use super::prompts::{options_system_prompt, options_user_prompt};
use super::OptionGenerator;
use crate::errors::AppResult;
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use crate::logging::AppLogger;
use crate::models::OptionSet;

/// Sampling temperature for option generation
const OPTIONS_TEMPERATURE: f32 = 0.7;

/// Option generator backed by an [`LlmProvider`]
#[derive(Clone)]
pub struct LlmOptionGenerator {
    provider: Arc<dyn LlmProvider>,
    model: Option<String>,
}

impl LlmOptionGenerator {
    /// Create a generator using the provider's default model
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            model: None,
        }
    }

    /// Use a specific model instead of the provider default
    #[must_use]
    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }

    fn build_request(&self, age: u32, formatted_context: &str) -> ChatRequest {
        ChatRequest::new(vec![
            ChatMessage::system(options_system_prompt()),
            ChatMessage::user(options_user_prompt(age, formatted_context)),
        ])
        .with_optional_model(self.model.as_deref())
        .with_temperature(OPTIONS_TEMPERATURE)
        .with_json_response()
    }
}

#[async_trait]
impl OptionGenerator for LlmOptionGenerator {
    #[instrument(skip(self, formatted_context), fields(provider = self.provider.name()))]
    async fn generate(&self, age: u32, formatted_context: &str) -> AppResult<OptionSet> {
        let request = self.build_request(age, formatted_context);
        let model = request
            .model
            .clone()
            .unwrap_or_else(|| self.provider.default_model().to_owned());

        let started = Instant::now();
        let result = self.provider.complete(&request).await;
        AppLogger::log_llm_call(
            self.provider.name(),
            &model,
            "fitness_options",
            result.is_ok(),
            started.elapsed().as_millis() as u64,
        );

        let response = result?;
        let options: OptionSet = parse_reply(&response.content, "fitness options")?;

        if options.is_empty() {
            warn!("Generator returned no options in any category");
        } else {
            debug!(count = options.len(), "Parsed generated options");
        }
        Ok(options)
    }
}
