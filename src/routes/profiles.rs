// ABOUTME: Route handlers for creating, reading, and updating user fitness profiles
// ABOUTME: Accepts camelCase request bodies and returns snake_case profile JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! Profile routes
//!
//! A newly created profile's id doubles as the client's session token.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{NewProfile, ProfileUpdate, UserProfile};
use crate::resources::ServerResources;

/// Request body for profile creation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileRequest {
    /// Display name
    pub name: Option<String>,
    /// Age in years
    pub age: Option<i64>,
    /// Primary fitness goal
    pub fitness_goal: Option<String>,
    /// Available equipment
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Preferred workout types
    #[serde(default)]
    pub workout_types: Vec<String>,
    /// Experience level
    pub experience_level: Option<String>,
}

impl CreateProfileRequest {
    fn into_new_profile(self) -> AppResult<NewProfile> {
        NewProfile::new(
            self.name.ok_or_else(|| AppError::missing_field("name"))?,
            self.age.ok_or_else(|| AppError::missing_field("age"))?,
            self.fitness_goal
                .ok_or_else(|| AppError::missing_field("fitnessGoal"))?,
            self.equipment,
            self.workout_types,
            self.experience_level
                .ok_or_else(|| AppError::missing_field("experienceLevel"))?,
        )
    }
}

/// Response for a created profile
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateProfileResponse {
    /// Token the client keeps to refer back to its profile
    pub session_token: String,
    /// Stored profile
    pub profile: UserProfile,
}

/// Response wrapping a single profile
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    /// Stored profile
    pub profile: UserProfile,
}

/// Profile routes implementation
pub struct ProfileRoutes;

impl ProfileRoutes {
    /// Create all profile routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/profile", post(Self::handle_create))
            .route("/api/profiles", post(Self::handle_create))
            .route(
                "/api/profiles/:id",
                get(Self::handle_get).put(Self::handle_update),
            )
            .with_state(resources)
    }

    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<CreateProfileRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(request) = payload?;
        let new_profile = request.into_new_profile()?;
        let profile = resources.profiles.create(new_profile).await?;

        info!(profile_id = %profile.id, "Profile created");
        let response = CreateProfileResponse {
            session_token: profile.id.to_string(),
            profile,
        };
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let id = parse_profile_id(&id)?;
        let profile = resources
            .profiles
            .get(id)
            .await?
            .ok_or_else(profile_not_found)?;

        Ok((StatusCode::OK, Json(ProfileResponse { profile })).into_response())
    }

    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        payload: Result<Json<Map<String, Value>>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let id = parse_profile_id(&id)?;
        let Json(body) = payload?;
        let update = ProfileUpdate::from_json(&body)?;

        let profile = resources
            .profiles
            .update(id, &update)
            .await?
            .ok_or_else(profile_not_found)?;

        info!(profile_id = %profile.id, changed = !update.is_empty(), "Profile updated");
        Ok((StatusCode::OK, Json(ProfileResponse { profile })).into_response())
    }
}

/// Ids that are not UUIDs can never match a stored profile
pub(crate) fn parse_profile_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| profile_not_found())
}

pub(crate) fn profile_not_found() -> AppError {
    AppError::not_found("Profile")
}
