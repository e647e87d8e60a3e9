// ABOUTME: Options reconciliation merging previous user selections into generated options
// ABOUTME: Guarantees selected items are present, surfaced first, and unique per category
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! # Options Reconciliation
//!
//! The generator does not reliably echo back what a user picked earlier. [`reconcile`]
//! repairs that: every well-formed selection of a known category ends up in its
//! category, synthesized from the selection itself when the generator left it out.
//!
//! Rules, applied per selection in order:
//!
//! 1. Selections with a blank `id` or `name` are skipped (logged at warn).
//! 2. Selections whose `type` is not `goal`, `equipment`, `workout`, or `level` are skipped.
//! 3. A selection whose id is already in its category is left where it is.
//! 4. Otherwise a synthesized option is inserted at the front of the category.
//!
//! Each category is then deduplicated by id, keeping the first occurrence. The function
//! is pure and idempotent.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::models::options::{CategoryOption, OptionCategory, OptionSet, Selection};

/// Merge `selections` into `generated`
#[must_use]
pub fn reconcile(mut generated: OptionSet, selections: &[Selection]) -> OptionSet {
    for selection in selections {
        if !selection.is_well_formed() {
            warn!(
                id = %selection.id,
                selection_type = %selection.selection_type,
                "Skipping selection without id or name"
            );
            continue;
        }

        let Some(category) = selection.category() else {
            debug!(
                id = %selection.id,
                selection_type = %selection.selection_type,
                "Ignoring selection with unknown type"
            );
            continue;
        };

        match category {
            OptionCategory::FitnessGoals => surface(&mut generated.fitness_goals, selection),
            OptionCategory::EquipmentOptions => {
                surface(&mut generated.equipment_options, selection);
            }
            OptionCategory::WorkoutTypes => surface(&mut generated.workout_types, selection),
            OptionCategory::ExperienceLevels => {
                surface(&mut generated.experience_levels, selection);
            }
        }
    }

    dedup_by_id(&mut generated.fitness_goals);
    dedup_by_id(&mut generated.equipment_options);
    dedup_by_id(&mut generated.workout_types);
    dedup_by_id(&mut generated.experience_levels);

    generated
}

/// Ensure the selection is present, inserting a synthesized option at the front if not
fn surface<T: CategoryOption>(items: &mut Vec<T>, selection: &Selection) {
    if items.iter().any(|item| item.id() == selection.id) {
        return;
    }
    debug!(
        id = %selection.id,
        category = %T::CATEGORY,
        "Synthesizing previously selected option"
    );
    items.insert(0, T::synthesize(selection.to_option()));
}

/// Drop later items whose id was already seen
fn dedup_by_id<T: CategoryOption>(items: &mut Vec<T>) {
    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(item.id().to_owned()));
}
