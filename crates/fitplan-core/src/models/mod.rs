// ABOUTME: Core data models for fitness options, user profiles, and workout plans
// ABOUTME: Re-exports the model types used across the server crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

/// Fitness option categories, option sets, and user selections
pub mod options;
/// Workout plan records and the weekly plan schema
pub mod plan;
/// User profile records and allow-listed updates
pub mod profile;

pub use options::{
    CategoryOption, EquipmentOption, ExperienceLevelOption, FitnessGoal, FitnessOption,
    OptionCategory, OptionSet, Selection, WorkoutTypeOption,
};
pub use plan::{DailyWorkout, Exercise, NewWorkoutPlan, WeeklyWorkout, WorkoutPlan, WorkoutPlanData};
pub use profile::{NewProfile, ProfileUpdate, UserProfile};
