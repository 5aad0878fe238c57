use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::activity::ActivityKind;
use crate::errors::CoreError;
use crate::ids::{PREFIX_ACTIVITY, generate_id};

/// An append-only activity log entry recording a change to a task.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TaskActivity {
    pub id: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: ActivityKind,
}

impl TaskActivity {
    /// Record `kind` performed by `user_id` at `timestamp` under a fresh ID.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::IdGeneration`] if no ID can be minted.
    pub fn record(
        user_id: impl Into<String>,
        kind: ActivityKind,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            id: generate_id(PREFIX_ACTIVITY)?,
            user_id: user_id.into(),
            timestamp,
            kind,
        })
    }
}
