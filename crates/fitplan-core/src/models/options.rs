// ABOUTME: Fitness option models for the four option categories and user selections
// ABOUTME: Defines FitnessOption, category wrappers with their extra field, OptionSet, and Selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::options::{
    DEFAULT_AGE_SPECIFIC_NOTES, DEFAULT_INTENSITY_RECOMMENDATION, DEFAULT_PROGRESSION_TIMELINE,
    DEFAULT_RELEVANCE_SCORE, DEFAULT_SAFETY_CONSIDERATIONS, FALLBACK_DESCRIPTION, FALLBACK_ICON,
    MAX_RELEVANCE_SCORE, MIN_RELEVANCE_SCORE,
};

/// One selectable fitness item with display metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitnessOption {
    /// Identifier, unique within its category
    pub id: String,
    /// Display name
    pub name: String,
    /// Longer description
    pub description: String,
    /// Icon name from the shared icon vocabulary
    pub icon: String,
    /// Relevance for the user, 1 to 10
    #[serde(
        default = "default_relevance_score",
        deserialize_with = "deserialize_relevance_score"
    )]
    pub relevance_score: u8,
}

const fn default_relevance_score() -> u8 {
    DEFAULT_RELEVANCE_SCORE
}

/// Accepts integer or fractional scores and clamps them into 1..=10.
/// `null` is treated like a missing score.
fn deserialize_relevance_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.map_or(DEFAULT_RELEVANCE_SCORE, clamp_relevance_score))
}

/// Round and clamp a raw score into the accepted range
#[must_use]
pub fn clamp_relevance_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return DEFAULT_RELEVANCE_SCORE;
    }
    raw.round()
        .clamp(f64::from(MIN_RELEVANCE_SCORE), f64::from(MAX_RELEVANCE_SCORE)) as u8
}

/// The four option categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionCategory {
    /// `fitness_goals`
    FitnessGoals,
    /// `equipment_options`
    EquipmentOptions,
    /// `workout_types`
    WorkoutTypes,
    /// `experience_levels`
    ExperienceLevels,
}

impl OptionCategory {
    /// All categories in response order
    pub const ALL: [Self; 4] = [
        Self::FitnessGoals,
        Self::EquipmentOptions,
        Self::WorkoutTypes,
        Self::ExperienceLevels,
    ];

    /// Resolve a selection `type` tag; unknown tags yield `None`
    #[must_use]
    pub fn from_selection_type(tag: &str) -> Option<Self> {
        match tag {
            "goal" => Some(Self::FitnessGoals),
            "equipment" => Some(Self::EquipmentOptions),
            "workout" => Some(Self::WorkoutTypes),
            "level" => Some(Self::ExperienceLevels),
            _ => None,
        }
    }

    /// JSON key of this category inside an `OptionSet`
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::FitnessGoals => "fitness_goals",
            Self::EquipmentOptions => "equipment_options",
            Self::WorkoutTypes => "workout_types",
            Self::ExperienceLevels => "experience_levels",
        }
    }

    /// Value given to the category's extra field when an option is synthesized
    #[must_use]
    pub const fn default_extra(self) -> &'static str {
        match self {
            Self::FitnessGoals => DEFAULT_AGE_SPECIFIC_NOTES,
            Self::EquipmentOptions => DEFAULT_SAFETY_CONSIDERATIONS,
            Self::WorkoutTypes => DEFAULT_INTENSITY_RECOMMENDATION,
            Self::ExperienceLevels => DEFAULT_PROGRESSION_TIMELINE,
        }
    }
}

impl Display for OptionCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Common behaviour of the per-category option types
pub trait CategoryOption: Sized {
    /// Category this type belongs to
    const CATEGORY: OptionCategory;

    /// Base option fields
    fn option(&self) -> &FitnessOption;

    /// Wrap a base option, filling the extra field with the category default
    fn synthesize(option: FitnessOption) -> Self;

    /// Identifier shortcut
    fn id(&self) -> &str {
        &self.option().id
    }
}

macro_rules! category_option {
    ($(#[$meta:meta])* $name:ident, $category:ident, $extra:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            /// Base option fields
            #[serde(flatten)]
            pub option: FitnessOption,
            #[doc = concat!("Category-specific `", stringify!($extra), "` text")]
            pub $extra: String,
        }

        impl CategoryOption for $name {
            const CATEGORY: OptionCategory = OptionCategory::$category;

            fn option(&self) -> &FitnessOption {
                &self.option
            }

            fn synthesize(option: FitnessOption) -> Self {
                Self {
                    option,
                    $extra: Self::CATEGORY.default_extra().to_owned(),
                }
            }
        }
    };
}

category_option!(
    /// Fitness goal with notes on why it suits the user's age
    FitnessGoal,
    FitnessGoals,
    age_specific_notes
);
category_option!(
    /// Equipment with age-specific safety notes
    EquipmentOption,
    EquipmentOptions,
    safety_considerations
);
category_option!(
    /// Workout type with an intensity recommendation
    WorkoutTypeOption,
    WorkoutTypes,
    intensity_recommendation
);
category_option!(
    /// Experience level with an expected progression timeline
    ExperienceLevelOption,
    ExperienceLevels,
    progression_timeline
);

/// The four-category collection of options shown to a user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSet {
    /// Goals
    #[serde(default)]
    pub fitness_goals: Vec<FitnessGoal>,
    /// Equipment
    #[serde(default)]
    pub equipment_options: Vec<EquipmentOption>,
    /// Workout types
    #[serde(default)]
    pub workout_types: Vec<WorkoutTypeOption>,
    /// Experience levels
    #[serde(default)]
    pub experience_levels: Vec<ExperienceLevelOption>,
}

impl OptionSet {
    /// Total number of options across all categories
    #[must_use]
    pub fn len(&self) -> usize {
        self.fitness_goals.len()
            + self.equipment_options.len()
            + self.workout_types.len()
            + self.experience_levels.len()
    }

    /// Whether every category is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Identifiers of one category, in order
    #[must_use]
    pub fn ids(&self, category: OptionCategory) -> Vec<&str> {
        match category {
            OptionCategory::FitnessGoals => self.fitness_goals.iter().map(CategoryOption::id).collect(),
            OptionCategory::EquipmentOptions => {
                self.equipment_options.iter().map(CategoryOption::id).collect()
            }
            OptionCategory::WorkoutTypes => self.workout_types.iter().map(CategoryOption::id).collect(),
            OptionCategory::ExperienceLevels => {
                self.experience_levels.iter().map(CategoryOption::id).collect()
            }
        }
    }
}

/// A user's previously confirmed choice
///
/// Every field tolerates being absent so that malformed entries reach
/// reconciliation and are skipped there instead of failing the whole request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Option identifier
    #[serde(default)]
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Optional description carried over from the client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional icon carried over from the client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Category tag: `goal`, `equipment`, `workout`, or `level`
    #[serde(rename = "type", default)]
    pub selection_type: String,
}

impl Selection {
    /// Create a selection with only the required fields
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        selection_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            icon: None,
            selection_type: selection_type.into(),
        }
    }

    /// A selection needs a non-blank id and name to be reconciled
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.id.trim().is_empty() && !self.name.trim().is_empty()
    }

    /// Category this selection belongs to, if its tag is known
    #[must_use]
    pub fn category(&self) -> Option<OptionCategory> {
        OptionCategory::from_selection_type(&self.selection_type)
    }

    /// Build the base option used when the generator did not return this selection
    #[must_use]
    pub fn to_option(&self) -> FitnessOption {
        FitnessOption {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_owned()),
            icon: self
                .icon
                .clone()
                .filter(|i| !i.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_ICON.to_owned()),
            relevance_score: MAX_RELEVANCE_SCORE,
        }
    }

    /// Short label used in generator prompts
    #[must_use]
    pub fn prompt_label(&self) -> String {
        if self.selection_type.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.selection_type)
        }
    }
}
