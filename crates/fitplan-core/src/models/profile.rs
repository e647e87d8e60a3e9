// ABOUTME: User fitness profile models with creation validation and allow-listed updates
// ABOUTME: Maps external camelCase and snake_case field names onto a fixed set of profile fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;
use uuid::Uuid;

use crate::constants::limits::{MAX_AGE, MAX_NAME_LENGTH, MIN_AGE};
use crate::errors::{AppError, AppResult};

/// Stored user fitness intake record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Opaque identifier, also handed to clients as the session token
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Age in years
    pub age: u32,
    /// Primary fitness goal
    pub fitness_goal: String,
    /// Available equipment, without duplicates
    pub equipment: Vec<String>,
    /// Preferred workout types, without duplicates
    pub workout_types: Vec<String>,
    /// Self-reported experience level
    pub experience_level: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for a new profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    /// Display name
    pub name: String,
    /// Age in years
    pub age: u32,
    /// Primary fitness goal
    pub fitness_goal: String,
    /// Available equipment
    pub equipment: Vec<String>,
    /// Preferred workout types
    pub workout_types: Vec<String>,
    /// Experience level
    pub experience_level: String,
}

impl NewProfile {
    /// Validate raw fields and normalize the list fields
    ///
    /// # Errors
    ///
    /// Returns a validation error when the name is blank or too long, the age is out of
    /// range, or the goal or level is blank.
    pub fn new(
        name: String,
        age: i64,
        fitness_goal: String,
        equipment: Vec<String>,
        workout_types: Vec<String>,
        experience_level: String,
    ) -> AppResult<Self> {
        Ok(Self {
            name: validate_name(name)?,
            age: validate_age(age)?,
            fitness_goal: require_text("fitnessGoal", fitness_goal)?,
            equipment: dedup_preserving_order(equipment),
            workout_types: dedup_preserving_order(workout_types),
            experience_level: require_text("experienceLevel", experience_level)?,
        })
    }
}

/// Allow-listed partial update of a profile
///
/// Only the fields below can change; `id` and the timestamps are never client-writable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// New name
    pub name: Option<String>,
    /// New age
    pub age: Option<u32>,
    /// New goal
    pub fitness_goal: Option<String>,
    /// Replacement equipment list
    pub equipment: Option<Vec<String>>,
    /// Replacement workout type list
    pub workout_types: Option<Vec<String>>,
    /// New experience level
    pub experience_level: Option<String>,
}

/// Internal profile fields that accept updates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UpdatableField {
    Name,
    Age,
    FitnessGoal,
    Equipment,
    WorkoutTypes,
    ExperienceLevel,
}

impl UpdatableField {
    /// Fixed mapping from external key to internal field
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "name" => Some(Self::Name),
            "age" => Some(Self::Age),
            "fitnessGoal" | "fitness_goal" => Some(Self::FitnessGoal),
            "equipment" => Some(Self::Equipment),
            "workoutTypes" | "workout_types" => Some(Self::WorkoutTypes),
            "experienceLevel" | "experience_level" => Some(Self::ExperienceLevel),
            _ => None,
        }
    }
}

impl ProfileUpdate {
    /// Build an update from a JSON object, ignoring keys outside the allow-list
    ///
    /// # Errors
    ///
    /// Returns a validation error when an allow-listed key carries a value of the wrong
    /// type or a value that fails validation.
    pub fn from_json(body: &Map<String, Value>) -> AppResult<Self> {
        let mut update = Self::default();

        for (key, value) in body {
            let Some(field) = UpdatableField::from_key(key) else {
                warn!(field = %key, "Ignoring non-updatable profile field");
                continue;
            };

            match field {
                UpdatableField::Name => {
                    update.name = Some(validate_name(expect_string(key, value)?)?);
                }
                UpdatableField::Age => {
                    let age = value
                        .as_i64()
                        .ok_or_else(|| AppError::invalid_input(format!("{key} must be an integer")))?;
                    update.age = Some(validate_age(age)?);
                }
                UpdatableField::FitnessGoal => {
                    update.fitness_goal = Some(require_text(key, expect_string(key, value)?)?);
                }
                UpdatableField::Equipment => {
                    update.equipment = Some(dedup_preserving_order(expect_string_list(key, value)?));
                }
                UpdatableField::WorkoutTypes => {
                    update.workout_types =
                        Some(dedup_preserving_order(expect_string_list(key, value)?));
                }
                UpdatableField::ExperienceLevel => {
                    update.experience_level = Some(require_text(key, expect_string(key, value)?)?);
                }
            }
        }

        Ok(update)
    }

    /// Whether the update changes nothing
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.fitness_goal.is_none()
            && self.equipment.is_none()
            && self.workout_types.is_none()
            && self.experience_level.is_none()
    }

    /// Apply the update in place and refresh `updated_at`
    pub fn apply_to(&self, profile: &mut UserProfile, now: DateTime<Utc>) {
        if self.is_empty() {
            return;
        }
        if let Some(name) = &self.name {
            profile.name.clone_from(name);
        }
        if let Some(age) = self.age {
            profile.age = age;
        }
        if let Some(goal) = &self.fitness_goal {
            profile.fitness_goal.clone_from(goal);
        }
        if let Some(equipment) = &self.equipment {
            profile.equipment.clone_from(equipment);
        }
        if let Some(workout_types) = &self.workout_types {
            profile.workout_types.clone_from(workout_types);
        }
        if let Some(level) = &self.experience_level {
            profile.experience_level.clone_from(level);
        }
        profile.updated_at = now;
    }
}

/// Check an age against the accepted range
///
/// # Errors
///
/// Returns `ValueOutOfRange` outside `MIN_AGE..=MAX_AGE`.
pub fn validate_age(age: i64) -> AppResult<u32> {
    u32::try_from(age)
        .ok()
        .filter(|a| (MIN_AGE..=MAX_AGE).contains(a))
        .ok_or_else(|| {
            AppError::out_of_range(format!("age must be between {MIN_AGE} and {MAX_AGE}"))
        })
}

/// Remove duplicate entries, keeping the first occurrence of each
#[must_use]
pub fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(|item| item.trim().to_owned())
        .filter(|item| !item.is_empty() && seen.insert(item.clone()))
        .collect()
}

fn validate_name(name: String) -> AppResult<String> {
    let name = require_text("name", name)?;
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::invalid_input(format!(
            "name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(name)
}

fn require_text(field: &str, value: String) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::missing_field(field));
    }
    Ok(trimmed.to_owned())
}

fn expect_string(key: &str, value: &Value) -> AppResult<String> {
    value
        .as_str()
        .map(ToOwned::to_owned)
        .ok_or_else(|| AppError::invalid_input(format!("{key} must be a string")))
}

fn expect_string_list(key: &str, value: &Value) -> AppResult<Vec<String>> {
    let invalid = || AppError::invalid_input(format!("{key} must be a list of strings"));
    value
        .as_array()
        .ok_or_else(invalid)?
        .iter()
        .map(|item| item.as_str().map(ToOwned::to_owned).ok_or_else(invalid))
        .collect()
}
