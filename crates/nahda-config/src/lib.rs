//! # nahda-config
//!
//! Layered configuration loading for the Nahda engine using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`NAHDA_*` prefix, `__` as separator)
//! 2. Project-level `.nahda/config.toml`
//! 3. User-level `~/.config/nahda/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `NAHDA_SCHEDULE__PASS_ORDER` -> `schedule.pass_order`,
//! `NAHDA_ANALYTICS__TREND_WINDOW` -> `analytics.trend_window`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use nahda_config::EngineConfig;
//!
//! let config = EngineConfig::load_with_dotenv().expect("config");
//! println!("sprint length: {} days", config.analytics.sprint_days);
//! ```

mod analytics;
mod error;
mod schedule;

pub use analytics::AnalyticsConfig;
pub use error::ConfigError;
pub use schedule::{PassOrder, ScheduleConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Longest sprint the velocity estimator accepts, in days.
pub const MAX_SPRINT_DAYS: u32 = 366;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

impl EngineConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Load from defaults, a specific TOML file, and the environment.
    ///
    /// Used when the caller points at a config file explicitly (`--config`).
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("NAHDA_").split("__"));
        Self::from_figment(figment)
    }

    /// Extract and validate a config from an arbitrary provider chain.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".nahda/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("NAHDA_").split("__"))
    }

    /// Reject values the estimators cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let analytics = &self.analytics;
        if analytics.trend_window < 2 {
            return Err(invalid(
                "analytics.trend_window",
                "a trend needs at least 2 points",
            ));
        }
        if !(analytics.trend_threshold.is_finite() && analytics.trend_threshold >= 0.0) {
            return Err(invalid(
                "analytics.trend_threshold",
                "must be a non-negative number",
            ));
        }
        if !(analytics.priority_match_weight.is_finite() && analytics.priority_match_weight > 0.0)
        {
            return Err(invalid(
                "analytics.priority_match_weight",
                "must be positive",
            ));
        }
        if !(analytics.description_length_scale.is_finite()
            && analytics.description_length_scale > 0.0)
        {
            return Err(invalid(
                "analytics.description_length_scale",
                "must be positive",
            ));
        }
        if !(1..=MAX_SPRINT_DAYS).contains(&analytics.sprint_days) {
            return Err(invalid(
                "analytics.sprint_days",
                "must be between 1 and 366",
            ));
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("nahda").join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
