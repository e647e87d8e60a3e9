// ABOUTME: Main library entry point for the FitPlan fitness API server
// ABOUTME: Wires profiles, LLM-generated options and workout plans behind an axum REST API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

#![deny(unsafe_code)]

//! # FitPlan Server
//!
//! REST backend for a fitness onboarding flow. Clients create a profile, ask for
//! personalized fitness options (with their earlier choices merged back in), and
//! request multi-week workout plans generated by an LLM.
//!
//! ## Architecture
//!
//! - **Core** (`fitplan-core`): errors, models, options reconciliation, static catalog
//! - **LLM**: provider abstraction with Gemini and `OpenAI`-compatible backends
//! - **Generators**: prompt building and reply parsing for options and plans
//! - **Database**: `SQLite` profile and plan stores
//! - **Routes**: thin axum handlers over [`resources::ServerResources`]
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use fitplan_server::config::ServerConfig;
//! use fitplan_server::database::Database;
//! use fitplan_server::resources::ServerResources;
//! use fitplan_server::server::FitPlanServer;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Arc::new(ServerConfig::from_env()?);
//!     let database = Database::connect(&config.database.url).await?;
//!     let resources = Arc::new(ServerResources::with_llm(database, config)?);
//!     FitPlanServer::new(resources).run().await
//! }
//! ```

pub use fitplan_core::{catalog, constants, errors, models, reconcile};

/// Environment-based configuration
pub mod config;

/// `SQLite` persistence for profiles and plans
pub mod database;

/// Option and plan generators
pub mod generators;

/// LLM provider abstraction
pub mod llm;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Shared server resources
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Router assembly and server lifecycle
pub mod server;
