// ABOUTME: Route handlers for personalized fitness options and the static catalog
// ABOUTME: Generated options are reconciled with the client's previous selections before returning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::debug;

use crate::catalog::fitness_catalog;
use crate::errors::{AppError, AppResult};
use crate::generators::prompts::format_selections;
use crate::generators::OptionGenerator;
use crate::models::profile::validate_age;
use crate::models::Selection;
use crate::reconcile::reconcile;
use crate::resources::ServerResources;

/// Request body for option generation
#[derive(Debug, Deserialize)]
pub struct OptionsRequest {
    /// Age in years
    pub age: Option<i64>,
    /// Previously confirmed choices to keep in the result
    pub selections: Option<Vec<Selection>>,
}

/// Options routes implementation
pub struct OptionsRoutes;

impl OptionsRoutes {
    /// Create all options routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/options", post(Self::handle_generate))
            .route("/api/fitness-options", get(Self::handle_catalog))
            .with_state(resources)
    }

    async fn handle_generate(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<OptionsRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(request) = payload?;
        let age = Self::require_age(request.age)?;
        let selections = request.selections.unwrap_or_default();

        let formatted = format_selections(&selections);
        debug!(age, selections = selections.len(), "Generating fitness options");

        let generated = resources.option_generator.generate(age, &formatted).await?;
        let options = reconcile(generated, &selections);

        Ok((StatusCode::OK, Json(options)).into_response())
    }

    async fn handle_catalog() -> Json<crate::catalog::FitnessCatalog> {
        Json(fitness_catalog())
    }

    fn require_age(age: Option<i64>) -> AppResult<u32> {
        validate_age(age.ok_or_else(|| AppError::missing_field("age"))?)
    }
}
