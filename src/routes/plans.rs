// ABOUTME: Route handlers for generating and fetching workout plans
// ABOUTME: Generation prompts the plan generator for a stored profile and appends the result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use tracing::info;

use super::profiles::{parse_profile_id, profile_not_found};
use crate::errors::{AppError, ErrorCode};
use crate::generators::PlanGenerator;
use crate::models::NewWorkoutPlan;
use crate::resources::ServerResources;

/// Workout plan routes implementation
pub struct PlanRoutes;

impl PlanRoutes {
    /// Create all workout plan routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/profiles/:id/workout-plan",
                post(Self::handle_generate).get(Self::handle_latest),
            )
            .with_state(resources)
    }

    async fn handle_generate(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let id = parse_profile_id(&id)?;
        let profile = resources
            .profiles
            .get(id)
            .await?
            .ok_or_else(profile_not_found)?;

        let plan_data = resources.plan_generator.generate(&profile).await?;
        let plan = resources
            .plans
            .create(NewWorkoutPlan::starting_at(profile.id, Utc::now(), plan_data))
            .await?;

        info!(profile_id = %profile.id, plan_id = plan.id, "Workout plan generated");
        Ok((StatusCode::CREATED, Json(plan)).into_response())
    }

    async fn handle_latest(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let no_plan = || AppError::new(ErrorCode::ResourceNotFound, "No workout plan found");

        let id = parse_profile_id(&id).map_err(|_| no_plan())?;
        let plan = resources.plans.latest(id).await?.ok_or_else(no_plan)?;

        Ok((StatusCode::OK, Json(plan)).into_response())
    }
}
