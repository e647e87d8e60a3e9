// ABOUTME: Profile store for creating, reading, and updating user fitness profiles
// ABOUTME: List fields are persisted as JSON text and writes run inside a transaction guard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use std::time::Instant;

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::{decode_timestamp, encode_timestamp, now, TransactionGuard};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{NewProfile, ProfileUpdate, UserProfile};

const SELECT_PROFILE: &str = r"
    SELECT id, name, age, fitness_goal, equipment, workout_types, experience_level,
           created_at, updated_at
    FROM user_profiles
    WHERE id = ?
";

/// Persistence for [`UserProfile`] records
#[derive(Clone)]
pub struct ProfileStore {
    pool: SqlitePool,
}

impl ProfileStore {
    /// Create a store over `pool`
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new profile with a fresh id and matching timestamps
    ///
    /// # Errors
    ///
    /// Returns a database error if the insert fails.
    pub async fn create(&self, new_profile: NewProfile) -> AppResult<UserProfile> {
        let started = Instant::now();
        let created_at = now();
        let profile = UserProfile {
            id: Uuid::new_v4(),
            name: new_profile.name,
            age: new_profile.age,
            fitness_goal: new_profile.fitness_goal,
            equipment: new_profile.equipment,
            workout_types: new_profile.workout_types,
            experience_level: new_profile.experience_level,
            created_at,
            updated_at: created_at,
        };

        let mut guard = TransactionGuard::begin(&self.pool).await?;
        let result = sqlx::query(
            r"
            INSERT INTO user_profiles (
                id, name, age, fitness_goal, equipment, workout_types, experience_level,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(profile.id.to_string())
        .bind(&profile.name)
        .bind(i64::from(profile.age))
        .bind(&profile.fitness_goal)
        .bind(encode_list(&profile.equipment)?)
        .bind(encode_list(&profile.workout_types)?)
        .bind(&profile.experience_level)
        .bind(encode_timestamp(profile.created_at))
        .bind(encode_timestamp(profile.updated_at))
        .execute(guard.executor()?)
        .await
        .map_err(|e| AppError::database(format!("Failed to create profile: {e}")));

        AppLogger::log_database_operation(
            "insert",
            "user_profiles",
            result.is_ok(),
            started.elapsed().as_millis() as u64,
        );
        result?;
        guard.commit().await?;

        debug!(profile_id = %profile.id, "Created profile");
        Ok(profile)
    }

    /// Look up a profile by id
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails or a stored row cannot be decoded.
    pub async fn get(&self, id: Uuid) -> AppResult<Option<UserProfile>> {
        let row = sqlx::query(SELECT_PROFILE)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get profile: {e}")))?;

        row.as_ref().map(row_to_profile).transpose()
    }

    /// Apply an allow-listed update and return the stored result
    ///
    /// An empty update returns the profile unchanged. Returns `Ok(None)` when no profile
    /// has this id.
    ///
    /// # Errors
    ///
    /// Returns a database error if reading or writing the row fails.
    pub async fn update(&self, id: Uuid, update: &ProfileUpdate) -> AppResult<Option<UserProfile>> {
        if update.is_empty() {
            return self.get(id).await;
        }

        let started = Instant::now();
        let mut guard = TransactionGuard::begin(&self.pool).await?;

        let row = sqlx::query(SELECT_PROFILE)
            .bind(id.to_string())
            .fetch_optional(guard.executor()?)
            .await
            .map_err(|e| AppError::database(format!("Failed to get profile: {e}")))?;
        let Some(row) = row else {
            guard.rollback().await?;
            return Ok(None);
        };

        let mut profile = row_to_profile(&row)?;
        update.apply_to(&mut profile, now());

        let result = sqlx::query(
            r"
            UPDATE user_profiles
            SET name = ?, age = ?, fitness_goal = ?, equipment = ?, workout_types = ?,
                experience_level = ?, updated_at = ?
            WHERE id = ?
            ",
        )
        .bind(&profile.name)
        .bind(i64::from(profile.age))
        .bind(&profile.fitness_goal)
        .bind(encode_list(&profile.equipment)?)
        .bind(encode_list(&profile.workout_types)?)
        .bind(&profile.experience_level)
        .bind(encode_timestamp(profile.updated_at))
        .bind(profile.id.to_string())
        .execute(guard.executor()?)
        .await
        .map_err(|e| AppError::database(format!("Failed to update profile: {e}")));

        AppLogger::log_database_operation(
            "update",
            "user_profiles",
            result.is_ok(),
            started.elapsed().as_millis() as u64,
        );
        result?;
        guard.commit().await?;

        debug!(profile_id = %profile.id, "Updated profile");
        Ok(Some(profile))
    }
}

fn encode_list(items: &[String]) -> AppResult<String> {
    serde_json::to_string(items)
        .map_err(|e| AppError::serialization(format!("Failed to encode list field: {e}")))
}

fn decode_list(column: &str, raw: &str) -> AppResult<Vec<String>> {
    serde_json::from_str(raw)
        .map_err(|e| AppError::database(format!("Invalid JSON list in {column}: {e}")))
}

fn row_to_profile(row: &SqliteRow) -> AppResult<UserProfile> {
    let id: String = row.try_get("id")?;
    let age: i64 = row.try_get("age")?;
    let equipment: String = row.try_get("equipment")?;
    let workout_types: String = row.try_get("workout_types")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(UserProfile {
        id: Uuid::parse_str(&id)
            .map_err(|e| AppError::database(format!("Invalid profile id {id}: {e}")))?,
        name: row.try_get("name")?,
        age: u32::try_from(age)
            .map_err(|_| AppError::database(format!("Invalid stored age {age}")))?,
        fitness_goal: row.try_get("fitness_goal")?,
        equipment: decode_list("equipment", &equipment)?,
        workout_types: decode_list("workout_types", &workout_types)?,
        experience_level: row.try_get("experience_level")?,
        created_at: decode_timestamp("created_at", &created_at)?,
        updated_at: decode_timestamp("updated_at", &updated_at)?,
    })
}
