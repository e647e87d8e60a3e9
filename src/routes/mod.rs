// ABOUTME: Route module organization for the FitPlan HTTP API
// ABOUTME: Each domain module exposes a Routes type building its axum Router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! HTTP routes organized by domain. Handlers stay thin and delegate to the
//! stores and generators held in [`crate::resources::ServerResources`].

/// Health check and readiness routes
pub mod health;
/// Fitness option generation and catalog routes
pub mod options;
/// Workout plan routes
pub mod plans;
/// Profile routes
pub mod profiles;

pub use health::HealthRoutes;
pub use options::{OptionsRequest, OptionsRoutes};
pub use plans::PlanRoutes;
pub use profiles::{CreateProfileRequest, CreateProfileResponse, ProfileResponse, ProfileRoutes};
