// ABOUTME: Core types and constants for the FitPlan fitness API
// ABOUTME: Foundation crate with error handling, option and profile models, and reconciliation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

#![deny(unsafe_code)]

//! # FitPlan Core
//!
//! Foundation crate providing shared types for the FitPlan server. Nothing in here
//! touches the network or the database, which keeps the reconciliation logic and
//! the data models testable in isolation.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Limits, defaults, and fallback values organized by domain
//! - **models**: Fitness options, user profiles, and workout plans
//! - **reconcile**: Merges previously selected options into freshly generated ones
//! - **catalog**: Static catalog of fitness options served without the LLM

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (options, profiles, plans)
pub mod models;

/// Options reconciliation
pub mod reconcile;

/// Static fitness options catalog
pub mod catalog;
