use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::timing::seconds_between;

/// An interval of active work on a task by one user.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct WorkSession {
    pub id: String,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    /// Seconds; 0 until the session is closed.
    #[serde(default)]
    pub duration: f64,
    pub user_id: String,
}

impl WorkSession {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    /// Elapsed seconds for a closed session, the stored duration otherwise.
    #[must_use]
    pub fn calculated_duration(&self) -> f64 {
        self.end_time.map_or(self.duration, |end| seconds_between(self.start_time, end))
    }
}
