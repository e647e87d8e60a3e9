// ABOUTME: RAII transaction guard for database writes
// ABOUTME: Rolls back automatically when dropped without an explicit commit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! Transaction management with an RAII guard
//!
//! ```text
//! let mut guard = TransactionGuard::begin(&pool).await?;
//! sqlx::query("INSERT INTO user_profiles ...").execute(guard.executor()?).await?;
//! guard.commit().await?;
//! ```
//!
//! Any `?` between `begin` and `commit` drops the guard, and `SQLx` rolls the
//! transaction back.

use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult};

/// RAII guard for a `SQLite` transaction
pub struct TransactionGuard<'c> {
    transaction: Option<Transaction<'c, Sqlite>>,
    committed: bool,
}

impl<'c> TransactionGuard<'c> {
    /// Wrap an existing transaction
    #[must_use]
    pub fn new(transaction: Transaction<'c, Sqlite>) -> Self {
        Self {
            transaction: Some(transaction),
            committed: false,
        }
    }
}

impl TransactionGuard<'static> {
    /// Begin a write transaction on `pool`
    ///
    /// Takes the write lock up front with `BEGIN IMMEDIATE`, so concurrent writers wait on
    /// the busy timeout instead of failing when a read lock cannot be upgraded.
    ///
    /// # Errors
    ///
    /// Returns a database error if no connection is available or the lock is not granted
    /// before the busy timeout.
    pub async fn begin(pool: &SqlitePool) -> AppResult<Self> {
        let tx = pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;
        Ok(Self::new(tx))
    }
}

impl TransactionGuard<'_> {
    /// Connection to run statements on inside the transaction
    ///
    /// # Errors
    ///
    /// Returns an internal error if the transaction was already consumed.
    pub fn executor(&mut self) -> AppResult<&mut SqliteConnection> {
        self.transaction
            .as_deref_mut()
            .ok_or_else(|| AppError::internal("Transaction already consumed"))
    }

    /// Commit the transaction and consume the guard
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails or the transaction was already consumed.
    pub async fn commit(mut self) -> AppResult<()> {
        let tx = self
            .transaction
            .take()
            .ok_or_else(|| AppError::internal("Transaction already consumed - cannot commit"))?;
        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Transaction commit failed: {e}")))?;
        self.committed = true;
        debug!("Transaction committed");
        Ok(())
    }

    /// Roll back explicitly and consume the guard
    ///
    /// # Errors
    ///
    /// Returns an error if the rollback fails.
    pub async fn rollback(mut self) -> AppResult<()> {
        if let Some(tx) = self.transaction.take() {
            tx.rollback()
                .await
                .map_err(|e| AppError::database(format!("Transaction rollback failed: {e}")))?;
            debug!("Transaction rolled back");
        }
        Ok(())
    }
}

impl Drop for TransactionGuard<'_> {
    fn drop(&mut self) {
        if !self.committed && self.transaction.is_some() {
            warn!("Transaction dropped without commit, rolling back");
        }
    }
}
