use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::DepartmentType;

/// A team and its leader. Sub-teams reference their parent.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub leader_id: String,
    #[serde(default)]
    pub member_ids: Vec<String>,
    #[serde(default)]
    pub department_type: DepartmentType,
    #[serde(default)]
    pub parent_team_id: Option<String>,
    #[serde(default)]
    pub sub_team_ids: Vec<String>,
}

impl Team {
    /// The identity fields transition guards need.
    #[must_use]
    pub fn reference(&self) -> TeamRef {
        TeamRef {
            id: self.id.clone(),
            leader_id: self.leader_id.clone(),
        }
    }

    #[must_use]
    pub fn is_member(&self, user_id: &str) -> bool {
        self.leader_id == user_id || self.member_ids.iter().any(|m| m == user_id)
    }
}

/// Team identity supplied by the caller for role checks.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TeamRef {
    pub id: String,
    pub leader_id: String,
}
