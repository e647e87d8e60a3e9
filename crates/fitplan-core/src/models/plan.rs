// ABOUTME: Workout plan models including the structured weekly plan schema
// ABOUTME: Plans are append-only records holding a validated multi-week schedule
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::constants::plans::{DEFAULT_SETS, PLAN_WEEKS};
use crate::errors::{AppError, AppResult};

/// Stored, generated workout schedule tied to a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    /// Row identifier, increasing with insertion order
    pub id: i64,
    /// Owning profile
    pub user_profile_id: Uuid,
    /// First day of the plan
    pub start_date: DateTime<Utc>,
    /// Last day of the plan
    pub end_date: DateTime<Utc>,
    /// Structured schedule
    pub plan_data: WorkoutPlanData,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Fields for a plan about to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkoutPlan {
    /// Owning profile
    pub user_profile_id: Uuid,
    /// First day of the plan
    pub start_date: DateTime<Utc>,
    /// Last day of the plan
    pub end_date: DateTime<Utc>,
    /// Structured schedule
    pub plan_data: WorkoutPlanData,
}

impl NewWorkoutPlan {
    /// Plan starting at `start` and spanning the standard plan length
    #[must_use]
    pub fn starting_at(
        user_profile_id: Uuid,
        start: DateTime<Utc>,
        plan_data: WorkoutPlanData,
    ) -> Self {
        Self {
            user_profile_id,
            start_date: start,
            end_date: start + Duration::weeks(i64::from(PLAN_WEEKS)),
            plan_data,
        }
    }
}

/// Complete multi-week schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutPlanData {
    /// Weeks in order
    pub weeks: Vec<WeeklyWorkout>,
}

/// One week of daily workouts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyWorkout {
    /// 1-based week number
    pub week_number: u32,
    /// Workout days
    pub days: Vec<DailyWorkout>,
}

/// A single workout day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyWorkout {
    /// Day number within the week
    pub day_number: u32,
    /// Main focus such as "Upper Body"
    pub focus: String,
    /// Exercises for the day
    pub exercises: Vec<Exercise>,
}

/// A single exercise in a workout day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Exercise name
    pub name: String,
    /// Exercise type such as "Strength Training" or "Cardio"
    #[serde(rename = "type")]
    pub exercise_type: String,
    /// Number of sets
    #[serde(default = "default_sets", deserialize_with = "deserialize_sets")]
    pub sets: u32,
    /// Repetitions per set, e.g. "10-12"
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub reps: Option<String>,
    /// Duration for timed exercises
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub duration: Option<String>,
    /// How to perform the exercise
    #[serde(default)]
    pub instructions: Option<String>,
    /// Equipment needed
    #[serde(default)]
    pub equipment: Vec<String>,
}

const fn default_sets() -> u32 {
    DEFAULT_SETS
}

fn deserialize_sets<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(DEFAULT_SETS))
}

/// Generators write reps as `12` as often as `"12"`; keep both as text.
fn deserialize_loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number, found {other}"
        ))),
    }
}

impl WorkoutPlanData {
    /// Check structural rules serde cannot express
    ///
    /// # Errors
    ///
    /// Returns `InvalidResponseShape` when the plan has no weeks, a week has no days,
    /// or a day has no exercises.
    pub fn validate(&self) -> AppResult<()> {
        if self.weeks.is_empty() {
            return Err(AppError::invalid_response_shape(
                "Workout plan contains no weeks",
            ));
        }
        for week in &self.weeks {
            if week.days.is_empty() {
                return Err(AppError::invalid_response_shape(format!(
                    "Week {} contains no workout days",
                    week.week_number
                )));
            }
            if let Some(day) = week.days.iter().find(|d| d.exercises.is_empty()) {
                return Err(AppError::invalid_response_shape(format!(
                    "Week {} day {} contains no exercises",
                    week.week_number, day.day_number
                )));
            }
        }
        Ok(())
    }

    /// Total number of workout days across all weeks
    #[must_use]
    pub fn total_days(&self) -> usize {
        self.weeks.iter().map(|w| w.days.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn one_week_plan() -> Value {
        json!({
            "weeks": [{
                "week_number": 1,
                "days": [{
                    "day_number": 1,
                    "focus": "Upper Body",
                    "exercises": [{
                        "name": "Push-ups",
                        "type": "Strength Training",
                        "reps": 12,
                        "equipment": []
                    }]
                }]
            }]
        })
    }

    #[test]
    fn test_exercise_defaults() {
        let plan: WorkoutPlanData = serde_json::from_value(one_week_plan()).unwrap();
        let exercise = &plan.weeks[0].days[0].exercises[0];
        assert_eq!(exercise.sets, DEFAULT_SETS);
        assert_eq!(exercise.reps.as_deref(), Some("12"));
        assert!(exercise.duration.is_none());
        assert!(plan.validate().is_ok());
        assert_eq!(plan.total_days(), 1);
    }

    #[test]
    fn test_null_sets_fall_back_to_default() {
        let mut value = one_week_plan();
        value["weeks"][0]["days"][0]["exercises"][0]["sets"] = Value::Null;
        let plan: WorkoutPlanData = serde_json::from_value(value).unwrap();
        assert_eq!(plan.weeks[0].days[0].exercises[0].sets, DEFAULT_SETS);
    }

    #[test]
    fn test_empty_plan_fails_validation() {
        let plan = WorkoutPlanData { weeks: vec![] };
        assert!(plan.validate().is_err());

        let plan: WorkoutPlanData =
            serde_json::from_value(json!({ "weeks": [{ "week_number": 1, "days": [] }] })).unwrap();
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_plan_spans_three_weeks() {
        let plan: WorkoutPlanData = serde_json::from_value(one_week_plan()).unwrap();
        let start = Utc::now();
        let new_plan = NewWorkoutPlan::starting_at(Uuid::new_v4(), start, plan);
        assert_eq!(new_plan.end_date - new_plan.start_date, Duration::weeks(3));
    }
}
