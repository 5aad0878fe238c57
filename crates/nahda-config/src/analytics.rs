//! Estimator and velocity configuration.

use serde::{Deserialize, Serialize};

/// Number of most recent completions used for trend detection.
const fn default_trend_window() -> usize {
    5
}

/// Slope magnitude (seconds per completion) below which the trend is stable.
const fn default_trend_threshold() -> f64 {
    0.1
}

/// Similarity multiplier applied when priorities match.
const fn default_priority_match_weight() -> f64 {
    1.5
}

/// Description length difference that halves similarity.
const fn default_description_length_scale() -> f64 {
    100.0
}

/// Sprint length used by team velocity.
const fn default_sprint_days() -> u32 {
    14
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalyticsConfig {
    #[serde(default = "default_trend_window")]
    pub trend_window: usize,

    #[serde(default = "default_trend_threshold")]
    pub trend_threshold: f64,

    #[serde(default = "default_priority_match_weight")]
    pub priority_match_weight: f64,

    #[serde(default = "default_description_length_scale")]
    pub description_length_scale: f64,

    #[serde(default = "default_sprint_days")]
    pub sprint_days: u32,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            trend_window: default_trend_window(),
            trend_threshold: default_trend_threshold(),
            priority_match_weight: default_priority_match_weight(),
            description_length_scale: default_description_length_scale(),
            sprint_days: default_sprint_days(),
        }
    }
}
