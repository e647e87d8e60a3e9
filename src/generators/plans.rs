// ABOUTME: LLM-backed workout plan generator
// ABOUTME: Builds the plan prompt from a profile, parses the reply, and validates its structure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::json::parse_reply;
use super::prompts::{plan_system_prompt, plan_user_prompt};
use super::PlanGenerator;
use crate::errors::AppResult;
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use crate::logging::AppLogger;
use crate::models::{UserProfile, WorkoutPlanData};

/// Sampling temperature for plan generation
const PLAN_TEMPERATURE: f32 = 0.4;

/// Plan generator backed by an [`LlmProvider`]
#[derive(Clone)]
pub struct LlmPlanGenerator {
    provider: Arc<dyn LlmProvider>,
    model: Option<String>,
}

impl LlmPlanGenerator {
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
}

#[async_trait]
impl PlanGenerator for LlmPlanGenerator {
    #[instrument(skip(self, profile), fields(provider = self.provider.name(), profile_id = %profile.id))]
    async fn generate(&self, profile: &UserProfile) -> AppResult<WorkoutPlanData> {
        let request = ChatRequest::new(vec![
            ChatMessage::system(plan_system_prompt()),
            ChatMessage::user(plan_user_prompt(profile)),
        ])
        .with_optional_model(self.model.as_deref())
        .with_temperature(PLAN_TEMPERATURE)
        .with_json_response();

        let model = request
            .model
            .clone()
            .unwrap_or_else(|| self.provider.default_model().to_owned());

        let started = Instant::now();
        let result = self.provider.complete(&request).await;
        AppLogger::log_llm_call(
            self.provider.name(),
            &model,
            "workout_plan",
            result.is_ok(),
            started.elapsed().as_millis() as u64,
        );

        let response = result?;
        let plan: WorkoutPlanData = parse_reply(&response.content, "workout plan")?;
        plan.validate()?;

        debug!(
            weeks = plan.weeks.len(),
            days = plan.total_days(),
            "Parsed generated workout plan"
        );
        Ok(plan)
    }
}
