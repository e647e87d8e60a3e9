// ABOUTME: Content generators producing fitness options and workout plans
// ABOUTME: Defines the OptionGenerator and PlanGenerator seams and their LLM-backed implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! # Generators
//!
//! Route handlers depend on the [`OptionGenerator`] and [`PlanGenerator`] traits, never
//! on a concrete LLM client. Production wiring uses [`LlmOptionGenerator`] and
//! [`LlmPlanGenerator`]; tests substitute canned implementations.
//!
//! Failure contract shared by both generators:
//!
//! - transport and upstream HTTP failures surface with the provider's external-service codes
//! - a reply that does not parse into the expected shape is `InvalidResponseShape`

use async_trait::async_trait;

use crate::errors::AppResult;
use crate::models::{OptionSet, UserProfile, WorkoutPlanData};

/// Reply parsing helpers
pub mod json;
/// LLM-backed option generation
mod options;
/// LLM-backed workout plan generation
mod plans;
/// Prompt templates
pub mod prompts;

pub use options::LlmOptionGenerator;
pub use plans::LlmPlanGenerator;

/// Produces candidate fitness options for a person
#[async_trait]
pub trait OptionGenerator: Send + Sync {
    /// Generate options for `age`, given already formatted previous selections
    async fn generate(&self, age: u32, formatted_context: &str) -> AppResult<OptionSet>;
}

/// Produces a structured multi-week workout plan for a profile
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    /// Generate a validated plan for `profile`
    async fn generate(&self, profile: &UserProfile) -> AppResult<WorkoutPlanData>;
}
