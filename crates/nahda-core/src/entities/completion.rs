use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Proof-of-completion submitted by the assignee, reviewed by the team leader.
///
/// A task keeps only its latest request; a new submission replaces the old one.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CompletionRequest {
    pub submitted_at: DateTime<Utc>,
    pub submitted_by: String,
    /// Reference to the uploaded proof image.
    pub image_url: String,
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reviewed_by: Option<String>,
}

impl CompletionRequest {
    #[must_use]
    pub const fn is_reviewed(&self) -> bool {
        self.reviewed_at.is_some()
    }

    /// Copy of this request stamped with the reviewer.
    #[must_use]
    pub fn reviewed(&self, reviewer: &str, at: DateTime<Utc>) -> Self {
        Self {
            reviewed_at: Some(at),
            reviewed_by: Some(reviewer.to_string()),
            ..self.clone()
        }
    }
}
