// ABOUTME: Shared server resources handed to every route through axum State
// ABOUTME: Holds the database, stores, generators, and configuration, built once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use std::sync::Arc;

use tracing::info;

use crate::config::ServerConfig;
use crate::database::{Database, PlanStore, ProfileStore};
use crate::errors::AppResult;
use crate::generators::{LlmOptionGenerator, LlmPlanGenerator, OptionGenerator, PlanGenerator};
use crate::llm::{ChatProvider, LlmProvider};

/// Everything a request handler needs, constructed explicitly in `main`
#[derive(Clone)]
pub struct ServerResources {
    /// Database handle, used for readiness checks
    pub database: Database,
    /// Profile persistence
    pub profiles: ProfileStore,
    /// Plan persistence
    pub plans: PlanStore,
    /// Option generation
    pub option_generator: Arc<dyn OptionGenerator>,
    /// Plan generation
    pub plan_generator: Arc<dyn PlanGenerator>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Assemble resources from already constructed parts
    #[must_use]
    pub fn new(
        database: Database,
        option_generator: Arc<dyn OptionGenerator>,
        plan_generator: Arc<dyn PlanGenerator>,
        config: Arc<ServerConfig>,
    ) -> Self {
        Self {
            profiles: database.profiles(),
            plans: database.plans(),
            database,
            option_generator,
            plan_generator,
            config,
        }
    }

    /// Build the configured LLM provider and wrap it in the production generators
    ///
    /// # Errors
    ///
    /// Returns a config error if the provider cannot be constructed, for example when
    /// Gemini is selected without an API key.
    pub fn with_llm(database: Database, config: Arc<ServerConfig>) -> AppResult<Self> {
        let provider: Arc<dyn LlmProvider> = Arc::new(ChatProvider::from_config(&config.llm)?);
        info!(
            provider = provider.name(),
            default_model = provider.default_model(),
            "LLM provider initialized"
        );

        let option_generator =
            LlmOptionGenerator::new(Arc::clone(&provider)).with_model(config.llm.options_model.clone());
        let plan_generator =
            LlmPlanGenerator::new(provider).with_model(config.llm.plan_model.clone());

        Ok(Self::new(
            database,
            Arc::new(option_generator),
            Arc::new(plan_generator),
            config,
        ))
    }
}
