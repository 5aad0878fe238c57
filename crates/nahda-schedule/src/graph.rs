//! Task dependency graph.
//!
//! Edges point from predecessor to successor. Node `i` is the `i`-th
//! distinct task of the input, so node indices double as input positions.

use std::collections::HashMap;

use rustworkx_core::petgraph::Direction;
use rustworkx_core::petgraph::algo::{tarjan_scc, toposort};
use rustworkx_core::petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, warn};

use nahda_core::entities::{Task, TaskDependency};
use nahda_core::enums::DependencyKind;

use crate::error::ScheduleError;

pub struct DependencyGraph<'a> {
    graph: DiGraph<&'a Task, DependencyKind>,
    skipped_edges: usize,
}

impl<'a> DependencyGraph<'a> {
    /// Build the graph over `tasks`. Repeated task IDs keep their first
    /// occurrence. Edges naming a task outside `tasks` are skipped and
    /// counted.
    #[must_use]
    pub fn build(tasks: &'a [Task], deps: &[TaskDependency]) -> Self {
        let mut graph = DiGraph::with_capacity(tasks.len(), deps.len());
        let mut id_to_index: HashMap<&str, NodeIndex> = HashMap::with_capacity(tasks.len());

        for task in tasks {
            if id_to_index.contains_key(task.id.as_str()) {
                warn!(task_id = %task.id, "duplicate task id in schedule input; keeping the first");
                continue;
            }
            let idx = graph.add_node(task);
            id_to_index.insert(task.id.as_str(), idx);
        }

        let mut skipped_edges = 0;
        for dep in deps {
            let (Some(&pred), Some(&succ)) = (
                id_to_index.get(dep.depends_on_task_id.as_str()),
                id_to_index.get(dep.task_id.as_str()),
            ) else {
                debug!(
                    task_id = %dep.task_id,
                    depends_on = %dep.depends_on_task_id,
                    "skipping dependency on a task outside the snapshot"
                );
                skipped_edges += 1;
                continue;
            };
            if dep.kind != DependencyKind::FinishToStart {
                debug!(
                    task_id = %dep.task_id,
                    depends_on = %dep.depends_on_task_id,
                    kind = dep.kind.code(),
                    "dependency evaluated as finish-to-start"
                );
            }
            graph.add_edge(pred, succ, dep.kind);
        }

        Self {
            graph,
            skipped_edges,
        }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub const fn skipped_edges(&self) -> usize {
        self.skipped_edges
    }

    /// Distinct tasks in input order.
    pub fn tasks(&self) -> impl Iterator<Item = &'a Task> + '_ {
        self.graph.node_indices().map(|idx| self.graph[idx])
    }

    /// Node positions in dependency order.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::CyclicDependency`] naming every task on a cycle.
    pub fn topological_order(&self) -> Result<Vec<usize>, ScheduleError> {
        match toposort(&self.graph, None) {
            Ok(order) => Ok(order.into_iter().map(NodeIndex::index).collect()),
            Err(_) => Err(ScheduleError::CyclicDependency {
                task_ids: self.cycle_members(),
            }),
        }
    }

    /// IDs of tasks that sit on a cycle, in input order.
    #[must_use]
    pub fn cycle_members(&self) -> Vec<String> {
        let mut members: Vec<NodeIndex> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1
                    || component
                        .first()
                        .is_some_and(|&n| self.graph.contains_edge(n, n))
            })
            .flatten()
            .collect();
        members.sort_unstable();
        members
            .into_iter()
            .map(|idx| self.graph[idx].id.clone())
            .collect()
    }

    /// Positions of the direct predecessors of node `pos`.
    pub fn predecessors(&self, pos: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .neighbors_directed(NodeIndex::new(pos), Direction::Incoming)
            .map(NodeIndex::index)
    }

    /// Positions of the direct successors of node `pos`.
    pub fn successors(&self, pos: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .neighbors_directed(NodeIndex::new(pos), Direction::Outgoing)
            .map(NodeIndex::index)
    }
}
