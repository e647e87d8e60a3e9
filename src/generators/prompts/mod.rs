// ABOUTME: Prompt construction for option and workout plan generation
// ABOUTME: System prompts are loaded at compile time from markdown; user prompts are built per request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! # Generation Prompts
//!
//! The fixed instructions live in markdown files next to this module so they can be
//! edited without touching code. The per-request part (age, selections, profile) is
//! assembled here.

use crate::constants::options::ICONS;
use crate::constants::plans::{PLAN_WEEKS, WORKOUT_DAYS_PER_WEEK};
use crate::models::{Selection, UserProfile};

/// Instructions for option generation, with an `{icons}` placeholder
const OPTIONS_SYSTEM_PROMPT: &str = include_str!("options_system.md");

/// Instructions for workout plan generation
const PLAN_SYSTEM_PROMPT: &str = include_str!("plan_system.md");

/// System prompt for option generation with the icon vocabulary filled in
#[must_use]
pub fn options_system_prompt() -> String {
    OPTIONS_SYSTEM_PROMPT.replace("{icons}", &ICONS.join(", "))
}

/// System prompt for workout plan generation
#[must_use]
pub const fn plan_system_prompt() -> &'static str {
    PLAN_SYSTEM_PROMPT
}

/// Coarse age bracket used to steer the generator
#[must_use]
pub const fn age_group(age: u32) -> &'static str {
    match age {
        0..=17 => "teen",
        18..=29 => "young adult",
        30..=44 => "adult",
        45..=64 => "mature adult",
        _ => "senior",
    }
}

/// Render previous selections for the prompt: `None` or a comma-joined list
#[must_use]
pub fn format_selections(selections: &[Selection]) -> String {
    let labels: Vec<String> = selections
        .iter()
        .filter(|s| s.is_well_formed())
        .map(Selection::prompt_label)
        .collect();

    if labels.is_empty() {
        "None".to_owned()
    } else {
        labels.join(", ")
    }
}

/// User prompt for option generation
#[must_use]
pub fn options_user_prompt(age: u32, formatted_selections: &str) -> String {
    format!(
        "Generate personalized fitness options for a {age} year old person ({group}) \
         with previous selections: {formatted_selections}.\n\
         Options the person selected before should appear in their category when they still fit.",
        group = age_group(age),
    )
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_owned()
    } else {
        items.join(", ")
    }
}

/// User prompt for workout plan generation
#[must_use]
pub fn plan_user_prompt(profile: &UserProfile) -> String {
    format!(
        "Create a comprehensive {PLAN_WEEKS}-week workout plan for a {level} level person \
         with the following details:\n\
         - Age: {age} ({group})\n\
         - Fitness Goal: {goal}\n\
         - Available Equipment: {equipment}\n\
         - Preferred Workout Types: {workout_types}\n\n\
         The plan must include {PLAN_WEEKS} weeks with {WORKOUT_DAYS_PER_WEEK} workout days per week. \
         Each day needs a specific focus and exercises with sets, reps or duration, and instructions \
         appropriate for the experience level and available equipment.",
        level = profile.experience_level,
        age = profile.age,
        group = age_group(profile.age),
        goal = profile.fitness_goal,
        equipment = join_or_none(&profile.equipment),
        workout_types = join_or_none(&profile.workout_types),
    )
}
