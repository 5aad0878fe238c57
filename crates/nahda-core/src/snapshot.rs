//! Point-in-time snapshot of a team's tasks.
//!
//! The engine never holds a live store connection. Callers fetch a
//! `Snapshot`, run engine functions over it, and persist the returned patches.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Task, TaskDependency, Team};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Snapshot {
    pub team: Team,
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Explicit edges. Edges implied by `Task::depends_on` are merged in by
    /// [`Snapshot::all_dependencies`].
    #[serde(default)]
    pub dependencies: Vec<TaskDependency>,
}

impl Snapshot {
    #[must_use]
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    #[must_use]
    pub fn task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Explicit edges followed by `depends_on` edges, without duplicates.
    #[must_use]
    pub fn all_dependencies(&self) -> Vec<TaskDependency> {
        let mut seen: HashSet<(String, String)> = self
            .dependencies
            .iter()
            .map(|e| (e.task_id.clone(), e.depends_on_task_id.clone()))
            .collect();
        let mut edges = self.dependencies.clone();
        for task in &self.tasks {
            for edge in task.dependencies() {
                if seen.insert((edge.task_id.clone(), edge.depends_on_task_id.clone())) {
                    edges.push(edge);
                }
            }
        }
        edges
    }
}
