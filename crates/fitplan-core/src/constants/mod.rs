// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Validation limits, option fallbacks, plan layout, and network defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! Constants module
//!
//! Constants are grouped into small domain modules rather than living in one flat list.

/// Service identity
pub mod service {
    /// Service name used in logs and health responses
    pub const SERVICE_NAME: &str = "fitplan-server";
}

/// Profile validation limits
pub mod limits {
    /// Youngest accepted age
    pub const MIN_AGE: u32 = 1;
    /// Oldest accepted age
    pub const MAX_AGE: u32 = 120;
    /// Longest accepted profile name
    pub const MAX_NAME_LENGTH: usize = 100;
}

/// Values used by options reconciliation and option parsing
pub mod options {
    /// Description given to a selected option the generator did not return
    pub const FALLBACK_DESCRIPTION: &str = "Previously selected option";
    /// Icon given to a selected option the generator did not return
    pub const FALLBACK_ICON: &str = "activity";
    /// Lowest relevance score
    pub const MIN_RELEVANCE_SCORE: u8 = 1;
    /// Highest relevance score, also given to synthesized selections
    pub const MAX_RELEVANCE_SCORE: u8 = 10;
    /// Score used when the generator omits one
    pub const DEFAULT_RELEVANCE_SCORE: u8 = 5;

    /// Default `age_specific_notes` for synthesized goals
    pub const DEFAULT_AGE_SPECIFIC_NOTES: &str = "Suitable for your age group";
    /// Default `safety_considerations` for synthesized equipment
    pub const DEFAULT_SAFETY_CONSIDERATIONS: &str = "Use with proper form";
    /// Default `intensity_recommendation` for synthesized workout types
    pub const DEFAULT_INTENSITY_RECOMMENDATION: &str = "Adjust intensity to your fitness level";
    /// Default `progression_timeline` for synthesized experience levels
    pub const DEFAULT_PROGRESSION_TIMELINE: &str = "Continue with your current level";

    /// Icons the generator is allowed to use
    pub const ICONS: &[&str] = &[
        "activity",
        "heart-pulse",
        "dumbbell",
        "running",
        "yoga",
        "swimming",
        "cycling",
        "walking",
        "stretching",
        "meditation",
    ];
}

/// Workout plan layout
pub mod plans {
    /// Number of weeks in a generated plan
    pub const PLAN_WEEKS: u32 = 3;
    /// Workout days per week requested from the generator
    pub const WORKOUT_DAYS_PER_WEEK: u32 = 5;
    /// Sets assumed when the generator omits them
    pub const DEFAULT_SETS: u32 = 3;
}

/// API endpoints
pub mod endpoints {
    /// Liveness probe
    pub const HEALTH: &str = "/health";
    /// Readiness probe
    pub const READY: &str = "/ready";
}

/// Network defaults
pub mod network {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
    /// Default bind address
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    /// Header carrying the per-request correlation id
    pub const REQUEST_ID_HEADER: &str = "x-request-id";
}
