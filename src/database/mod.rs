// ABOUTME: SQLite database management for profiles and workout plans
// ABOUTME: Owns the connection pool, schema migration, readiness ping, and store accessors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! # Database Management
//!
//! A single `SqlitePool` backs two stores:
//!
//! - [`ProfileStore`]: create, read, and allow-listed update of user profiles
//! - [`PlanStore`]: append-only workout plans with latest-plan lookup
//!
//! Timestamps are stored as fixed-precision RFC 3339 text so that ordering by the
//! column text is chronological.

mod plans;
mod profiles;
/// RAII transaction guard
pub mod transactions;

pub use plans::PlanStore;
pub use profiles::ProfileStore;
pub use transactions::TransactionGuard;

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::config::DatabaseUrl;
use crate::errors::{AppError, AppResult};

/// Pool size for file-backed databases
const MAX_CONNECTIONS: u32 = 5;

/// How long a writer waits for the database lock before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

/// Database manager for profile and plan storage
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the database and run migrations
    ///
    /// # Errors
    ///
    /// Returns a database error if the file cannot be opened or the schema cannot be created.
    pub async fn connect(url: &DatabaseUrl) -> AppResult<Self> {
        if let DatabaseUrl::SQLite { path } = url {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::database(format!(
                        "Failed to create database directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let options = SqliteConnectOptions::from_str(&url.to_connection_string())
            .map_err(|e| AppError::database(format!("Invalid database URL {url}: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT);
        let options = if url.is_memory() {
            options
        } else {
            options.journal_mode(SqliteJournalMode::Wal)
        };

        // Every connection to `:memory:` is a separate database; keep exactly one alive
        let pool_options = if url.is_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database {url}: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;

        info!(database = %url, "Database ready");
        Ok(db)
    }

    /// Get a reference to the database pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Profile store sharing this pool
    #[must_use]
    pub fn profiles(&self) -> ProfileStore {
        ProfileStore::new(self.pool.clone())
    }

    /// Plan store sharing this pool
    #[must_use]
    pub fn plans(&self) -> PlanStore {
        PlanStore::new(self.pool.clone())
    }

    /// Create tables and indexes if they do not exist
    ///
    /// # Errors
    ///
    /// Returns a database error if a statement fails.
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_profiles (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                age INTEGER NOT NULL,
                fitness_goal TEXT NOT NULL,
                equipment TEXT NOT NULL DEFAULT '[]',
                workout_types TEXT NOT NULL DEFAULT '[]',
                experience_level TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create user_profiles table: {e}")))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_plans (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_profile_id TEXT NOT NULL REFERENCES user_profiles(id),
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                plan_data TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create workout_plans table: {e}")))?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_workout_plans_profile_created
            ON workout_plans(user_profile_id, created_at DESC, id DESC)
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create workout_plans index: {e}")))?;

        debug!("Database migrations applied");
        Ok(())
    }

    /// Cheap round trip used by the readiness probe
    ///
    /// # Errors
    ///
    /// Returns a database error if the pool cannot serve a query.
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }
}

/// Current time at storage precision, so returned records equal what is read back
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Encode a timestamp for storage
pub(crate) fn encode_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Decode a stored timestamp
pub(crate) fn decode_timestamp(column: &str, raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid timestamp in {column}: {e}")))
}
