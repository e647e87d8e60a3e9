// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory databases, canned generators, and router construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors
#![allow(
    dead_code,
    missing_docs,
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `fitplan_server`

use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use fitplan_server::{
    config::ServerConfig,
    database::Database,
    errors::{AppError, AppResult, ErrorCode},
    generators::{OptionGenerator, PlanGenerator},
    models::{OptionSet, UserProfile, WorkoutPlanData},
    resources::ServerResources,
    server::build_router,
};
use serde_json::{json, Value};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Fresh in-memory database with the schema applied
pub async fn create_test_database() -> Database {
    init_test_logging();
    Database::connect(&fitplan_server::config::DatabaseUrl::Memory)
        .await
        .unwrap()
}

/// Option generator that returns a fixed set and records its inputs
#[derive(Default)]
pub struct StaticOptionGenerator {
    options: OptionSet,
    calls: Mutex<Vec<(u32, String)>>,
}

impl StaticOptionGenerator {
    pub fn new(options: OptionSet) -> Self {
        Self {
            options,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(age, formatted_context)` of every call so far
    pub fn calls(&self) -> Vec<(u32, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl OptionGenerator for StaticOptionGenerator {
    async fn generate(&self, age: u32, formatted_context: &str) -> AppResult<OptionSet> {
        self.calls
            .lock()
            .unwrap()
            .push((age, formatted_context.to_owned()));
        Ok(self.options.clone())
    }
}

/// Plan generator that returns a fixed plan
pub struct StaticPlanGenerator {
    plan: WorkoutPlanData,
}

impl StaticPlanGenerator {
    pub const fn new(plan: WorkoutPlanData) -> Self {
        Self { plan }
    }
}

#[async_trait]
impl PlanGenerator for StaticPlanGenerator {
    async fn generate(&self, _profile: &UserProfile) -> AppResult<WorkoutPlanData> {
        Ok(self.plan.clone())
    }
}

/// Generator failing every call with the given code
pub struct FailingGenerator {
    code: ErrorCode,
}

impl FailingGenerator {
    pub const fn new(code: ErrorCode) -> Self {
        Self { code }
    }

    fn error(&self) -> AppError {
        AppError::new(self.code, "generator failed")
    }
}

#[async_trait]
impl OptionGenerator for FailingGenerator {
    async fn generate(&self, _age: u32, _formatted_context: &str) -> AppResult<OptionSet> {
        Err(self.error())
    }
}

#[async_trait]
impl PlanGenerator for FailingGenerator {
    async fn generate(&self, _profile: &UserProfile) -> AppResult<WorkoutPlanData> {
        Err(self.error())
    }
}

/// Resources over a fresh in-memory database and the given generators
pub async fn create_test_resources(
    option_generator: Arc<dyn OptionGenerator>,
    plan_generator: Arc<dyn PlanGenerator>,
) -> Arc<ServerResources> {
    let database = create_test_database().await;
    Arc::new(ServerResources::new(
        database,
        option_generator,
        plan_generator,
        Arc::new(ServerConfig::default()),
    ))
}

/// Full application router with canned generators
pub async fn create_test_app() -> axum::Router {
    let resources = create_test_resources(
        Arc::new(StaticOptionGenerator::new(sample_option_set())),
        Arc::new(StaticPlanGenerator::new(sample_plan_data())),
    )
    .await;
    build_router(resources)
}

/// A generated option set with one entry per category
pub fn sample_option_set() -> OptionSet {
    serde_json::from_value(json!({
        "fitness_goals": [{
            "id": "build-muscle",
            "name": "Build Muscle",
            "description": "Increase strength and muscle mass",
            "icon": "dumbbell",
            "relevance_score": 9,
            "age_specific_notes": "Great at any age with good form"
        }],
        "equipment_options": [{
            "id": "dumbbells",
            "name": "Dumbbells",
            "description": "Adjustable free weights",
            "icon": "dumbbell",
            "relevance_score": 8,
            "safety_considerations": "Start light"
        }],
        "workout_types": [{
            "id": "hiit",
            "name": "HIIT",
            "description": "Short intense intervals",
            "icon": "heart-pulse",
            "relevance_score": 7,
            "intensity_recommendation": "Two sessions per week"
        }],
        "experience_levels": [{
            "id": "beginner",
            "name": "Beginner",
            "description": "New to training",
            "icon": "activity",
            "relevance_score": 6,
            "progression_timeline": "4-6 weeks to build a base"
        }]
    }))
    .unwrap()
}

/// A valid single-week plan
pub fn sample_plan_data() -> WorkoutPlanData {
    serde_json::from_value(json!({
        "weeks": [{
            "week_number": 1,
            "days": [{
                "day_number": 1,
                "focus": "Full Body",
                "exercises": [{
                    "name": "Goblet Squat",
                    "type": "Strength Training",
                    "sets": 3,
                    "reps": "10-12",
                    "instructions": "Keep the chest up",
                    "equipment": ["Dumbbells"]
                }]
            }]
        }]
    }))
    .unwrap()
}

/// Camel-case profile creation body
pub fn sample_profile_body() -> Value {
    json!({
        "name": "Jordan",
        "age": 34,
        "fitnessGoal": "Build Muscle",
        "equipment": ["Dumbbells", "Resistance Bands", "Dumbbells"],
        "workoutTypes": ["Strength Training"],
        "experienceLevel": "Beginner"
    })
}
