// ABOUTME: Plan store for appending workout plans and fetching the latest plan per profile
// ABOUTME: Plan bodies are stored as JSON text alongside their date range
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use std::time::Instant;

use chrono::SubsecRound;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::{decode_timestamp, encode_timestamp, now, TransactionGuard};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{NewWorkoutPlan, WorkoutPlan};

/// Append-only persistence for [`WorkoutPlan`] records
#[derive(Clone)]
pub struct PlanStore {
    pool: SqlitePool,
}

impl PlanStore {
    /// Create a store over `pool`
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a new plan; earlier plans for the profile are kept
    ///
    /// # Errors
    ///
    /// Returns a database error if the insert fails, including when the owning
    /// profile does not exist.
    pub async fn create(&self, new_plan: NewWorkoutPlan) -> AppResult<WorkoutPlan> {
        let started = Instant::now();
        let created_at = now();
        let start_date = new_plan.start_date.trunc_subsecs(6);
        let end_date = new_plan.end_date.trunc_subsecs(6);
        let plan_json = serde_json::to_string(&new_plan.plan_data)
            .map_err(|e| AppError::serialization(format!("Failed to encode plan data: {e}")))?;

        let mut guard = TransactionGuard::begin(&self.pool).await?;
        let result = sqlx::query(
            r"
            INSERT INTO workout_plans (user_profile_id, start_date, end_date, plan_data, created_at)
            VALUES (?, ?, ?, ?, ?)
            ",
        )
        .bind(new_plan.user_profile_id.to_string())
        .bind(encode_timestamp(start_date))
        .bind(encode_timestamp(end_date))
        .bind(plan_json)
        .bind(encode_timestamp(created_at))
        .execute(guard.executor()?)
        .await
        .map_err(|e| AppError::database(format!("Failed to create workout plan: {e}")));

        AppLogger::log_database_operation(
            "insert",
            "workout_plans",
            result.is_ok(),
            started.elapsed().as_millis() as u64,
        );
        let id = result?.last_insert_rowid();
        guard.commit().await?;

        debug!(plan_id = id, profile_id = %new_plan.user_profile_id, "Created workout plan");
        Ok(WorkoutPlan {
            id,
            user_profile_id: new_plan.user_profile_id,
            start_date,
            end_date,
            plan_data: new_plan.plan_data,
            created_at,
        })
    }

    /// Most recently created plan for a profile
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails or the stored plan cannot be decoded.
    pub async fn latest(&self, user_profile_id: Uuid) -> AppResult<Option<WorkoutPlan>> {
        let row = sqlx::query(
            r"
            SELECT id, user_profile_id, start_date, end_date, plan_data, created_at
            FROM workout_plans
            WHERE user_profile_id = ?
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            ",
        )
        .bind(user_profile_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get latest workout plan: {e}")))?;

        row.as_ref().map(row_to_plan).transpose()
    }
}

fn row_to_plan(row: &SqliteRow) -> AppResult<WorkoutPlan> {
    let profile_id: String = row.try_get("user_profile_id")?;
    let start_date: String = row.try_get("start_date")?;
    let end_date: String = row.try_get("end_date")?;
    let plan_data: String = row.try_get("plan_data")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(WorkoutPlan {
        id: row.try_get("id")?,
        user_profile_id: Uuid::parse_str(&profile_id)
            .map_err(|e| AppError::database(format!("Invalid profile id {profile_id}: {e}")))?,
        start_date: decode_timestamp("start_date", &start_date)?,
        end_date: decode_timestamp("end_date", &end_date)?,
        plan_data: serde_json::from_str(&plan_data)
            .map_err(|e| AppError::database(format!("Invalid stored plan data: {e}")))?,
        created_at: decode_timestamp("created_at", &created_at)?,
    })
}
