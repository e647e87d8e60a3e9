// ABOUTME: Tests for file-backed SQLite storage
// ABOUTME: Verifies directory creation, persistence, idempotent migrations, and concurrent writers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Utc;
use fitplan_server::config::DatabaseUrl;
use fitplan_server::database::Database;
use fitplan_server::models::{NewProfile, NewWorkoutPlan, ProfileUpdate};
use tempfile::TempDir;
use tokio::task::JoinSet;

fn new_profile() -> NewProfile {
    NewProfile::new(
        "Sam".to_owned(),
        27,
        "Gain Strength".to_owned(),
        vec!["Barbell".to_owned()],
        vec!["Strength Training".to_owned()],
        "Advanced".to_owned(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("fitplan.db");
    let url = DatabaseUrl::SQLite { path: path.clone() };

    let db = Database::connect(&url).await.unwrap();
    db.ping().await.unwrap();

    assert!(path.exists());
}

#[tokio::test]
async fn test_data_survives_reconnect() {
    let dir = TempDir::new().unwrap();
    let url = DatabaseUrl::SQLite {
        path: dir.path().join("fitplan.db"),
    };

    let (profile, plan) = {
        let db = Database::connect(&url).await.unwrap();
        let profile = db.profiles().create(new_profile()).await.unwrap();
        let plan = db
            .plans()
            .create(NewWorkoutPlan::starting_at(
                profile.id,
                Utc::now(),
                common::sample_plan_data(),
            ))
            .await
            .unwrap();
        db.pool().close().await;
        (profile, plan)
    };

    let reopened = Database::connect(&url).await.unwrap();
    assert_eq!(
        reopened.profiles().get(profile.id).await.unwrap(),
        Some(profile.clone())
    );
    assert_eq!(
        reopened.plans().latest(profile.id).await.unwrap(),
        Some(plan)
    );
}

#[tokio::test]
async fn test_migrate_is_idempotent() {
    let db = common::create_test_database().await;
    db.migrate().await.unwrap();
    db.migrate().await.unwrap();
    db.ping().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_writes_on_file_database_all_succeed() {
    let dir = TempDir::new().unwrap();
    let url = DatabaseUrl::SQLite {
        path: dir.path().join("fitplan.db"),
    };
    let db = Database::connect(&url).await.unwrap();
    let profile = db.profiles().create(new_profile()).await.unwrap();

    let mut tasks = JoinSet::new();
    for i in 0..40_u32 {
        let profiles = db.profiles();
        let plans = db.plans();
        let id = profile.id;
        tasks.spawn(async move {
            let update = ProfileUpdate {
                age: Some(20 + i),
                ..ProfileUpdate::default()
            };
            profiles.update(id, &update).await?;
            plans
                .create(NewWorkoutPlan::starting_at(
                    id,
                    Utc::now(),
                    common::sample_plan_data(),
                ))
                .await
                .map(|_| ())
        });
    }

    let mut failures = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined.unwrap() {
            failures.push(e.to_string());
        }
    }
    assert!(failures.is_empty(), "failed writes: {failures:?}");

    let stored = db.profiles().get(profile.id).await.unwrap().unwrap();
    assert!((20..60).contains(&stored.age));
    assert!(db.plans().latest(profile.id).await.unwrap().is_some());
}
