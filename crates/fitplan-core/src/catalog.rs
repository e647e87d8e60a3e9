// ABOUTME: Static catalog of fitness goals, equipment, workout types, and experience levels
// ABOUTME: Served as-is for intake forms that do not need LLM personalization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use serde::Serialize;

/// One fixed catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    /// Identifier, unique within its category
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Short description
    pub description: &'static str,
    /// Icon name
    pub icon: &'static str,
}

const fn entry(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
) -> CatalogEntry {
    CatalogEntry {
        id,
        name,
        description,
        icon,
    }
}

/// Predefined fitness goals
pub const FITNESS_GOALS: &[CatalogEntry] = &[
    entry("lose_weight", "Lose Weight", "Burn calories and reduce body fat with a mix of cardio and strength work.", "scale-down"),
    entry("build_muscle", "Build Muscle", "Resistance training with progressive overload to add muscle mass.", "dumbbell"),
    entry("improve_endurance", "Improve Endurance", "Build cardiovascular fitness and stamina through sustained activity.", "heart-pulse"),
    entry("increase_flexibility", "Increase Flexibility", "Improve range of motion and reduce injury risk with stretching and mobility work.", "activity"),
    entry("general_fitness", "General Fitness", "Stay healthy with a balanced mix of training styles.", "zap"),
    entry("tone_body", "Tone Body", "Define muscles and improve body composition without adding bulk.", "figure-standing"),
];

/// Predefined equipment
pub const EQUIPMENT_OPTIONS: &[CatalogEntry] = &[
    entry("dumbbells", "Dumbbells", "Free weights suited to most strength exercises.", "dumbbell"),
    entry("resistance_bands", "Resistance Bands", "Elastic bands that add tension to strength movements.", "circle-dashed"),
    entry("yoga_mat", "Yoga Mat", "Cushioning and grip for floor work.", "rectangle-horizontal"),
    entry("treadmill", "Treadmill", "Indoor walking and running.", "footprints"),
    entry("stationary_bike", "Stationary Bike", "Indoor cycling for cardio sessions.", "bike"),
    entry("kettlebell", "Kettlebell", "Handled weight for dynamic strength exercises.", "dumbbell"),
    entry("pull_up_bar", "Pull-up Bar", "Bar for upper body pulling exercises.", "arrow-up"),
    entry("jump_rope", "Jump Rope", "Simple tool for cardio and coordination.", "circle-dashed"),
    entry("bench", "Bench", "Platform for pressing, step-ups, and supported movements.", "rectangle-horizontal"),
    entry("foam_roller", "Foam Roller", "Self-massage and myofascial release.", "cylinder"),
];

/// Predefined workout types
pub const WORKOUT_TYPES: &[CatalogEntry] = &[
    entry("strength_training", "Strength Training", "Resistance exercises that build strength and muscular endurance.", "dumbbell"),
    entry("hiit", "HIIT", "High-intensity intervals alternating hard bursts with recovery.", "timer"),
    entry("cardio", "Cardio", "Aerobic work that raises heart rate and improves cardiovascular health.", "heart-pulse"),
    entry("yoga", "Yoga", "Postures, breathing, and meditation combined.", "lotus"),
    entry("pilates", "Pilates", "Low-impact core, posture, and flexibility work.", "circle-dot"),
    entry("functional_training", "Functional Training", "Movements that carry over to everyday activities.", "activity"),
    entry("crossfit", "CrossFit", "High-intensity functional movements across many styles.", "box"),
    entry("calisthenics", "Calisthenics", "Bodyweight training for strength, endurance, and flexibility.", "user"),
];

/// Predefined experience levels
pub const EXPERIENCE_LEVELS: &[CatalogEntry] = &[
    entry("beginner", "Beginner", "New to training or returning after a long break.", "baby"),
    entry("intermediate", "Intermediate", "Trains regularly and knows basic form.", "user"),
    entry("advanced", "Advanced", "Consistent training history with solid technique.", "trophy"),
];

/// The full catalog, shaped like an option set
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FitnessCatalog {
    /// Goals
    pub fitness_goals: &'static [CatalogEntry],
    /// Equipment
    pub equipment_options: &'static [CatalogEntry],
    /// Workout types
    pub workout_types: &'static [CatalogEntry],
    /// Experience levels
    pub experience_levels: &'static [CatalogEntry],
}

/// Return the static catalog
#[must_use]
pub const fn fitness_catalog() -> FitnessCatalog {
    FitnessCatalog {
        fitness_goals: FITNESS_GOALS,
        equipment_options: EQUIPMENT_OPTIONS,
        workout_types: WORKOUT_TYPES,
        experience_levels: EXPERIENCE_LEVELS,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_catalog_ids_are_unique_per_category() {
        let catalog = fitness_catalog();
        for entries in [
            catalog.fitness_goals,
            catalog.equipment_options,
            catalog.workout_types,
            catalog.experience_levels,
        ] {
            let ids: HashSet<_> = entries.iter().map(|e| e.id).collect();
            assert_eq!(ids.len(), entries.len());
        }
    }

    #[test]
    fn test_catalog_serializes_all_categories() {
        let value = serde_json::to_value(fitness_catalog()).unwrap();
        assert_eq!(value["fitness_goals"].as_array().map(Vec::len), Some(6));
        assert_eq!(value["equipment_options"].as_array().map(Vec::len), Some(10));
        assert_eq!(value["workout_types"].as_array().map(Vec::len), Some(8));
        assert_eq!(value["experience_levels"][0]["id"], "beginner");
    }
}
