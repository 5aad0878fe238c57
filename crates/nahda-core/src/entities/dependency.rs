use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::DependencyKind;

/// Directed scheduling edge: `task_id` depends on `depends_on_task_id`.
///
/// Both ends are weak references; either task may be missing from a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct TaskDependency {
    pub task_id: String,
    pub depends_on_task_id: String,
    #[serde(default)]
    pub kind: DependencyKind,
}

impl TaskDependency {
    #[must_use]
    pub fn finish_to_start(task_id: impl Into<String>, depends_on: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            depends_on_task_id: depends_on.into(),
            kind: DependencyKind::FinishToStart,
        }
    }
}
