//! Forward/backward CPM passes and critical path extraction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use nahda_config::{PassOrder, ScheduleConfig};
use nahda_core::entities::{Task, TaskDependency};
use nahda_core::timing::sanitize_secs;

use crate::error::ScheduleError;
use crate::graph::DependencyGraph;

/// Slack at or below this many seconds counts as zero.
pub const SLACK_EPSILON: f64 = 1e-9;

/// Timing of one task in the schedule. All values are seconds from the
/// project start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleNode {
    pub task_id: String,
    pub duration: f64,
    pub earliest_start: f64,
    pub earliest_finish: f64,
    pub latest_start: f64,
    pub latest_finish: f64,
    pub slack: f64,
}

impl ScheduleNode {
    #[must_use]
    pub fn is_critical(&self) -> bool {
        self.slack.abs() <= SLACK_EPSILON
    }
}

/// Result of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleReport {
    /// One node per distinct task, in input order.
    pub nodes: Vec<ScheduleNode>,
    /// Zero-slack task IDs ordered by `started_at`.
    pub critical_path: Vec<String>,
    pub max_finish: f64,
    /// Edges dropped because an endpoint was not in the input.
    pub skipped_edges: usize,
    pub pass_order: PassOrder,
}

impl ScheduleReport {
    #[must_use]
    pub fn node(&self, task_id: &str) -> Option<&ScheduleNode> {
        self.nodes.iter().find(|n| n.task_id == task_id)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CriticalPathAnalyzer {
    pass_order: PassOrder,
}

impl CriticalPathAnalyzer {
    #[must_use]
    pub const fn new(pass_order: PassOrder) -> Self {
        Self { pass_order }
    }

    #[must_use]
    pub const fn from_config(config: &ScheduleConfig) -> Self {
        Self::new(config.pass_order)
    }

    /// Compute the full schedule for `tasks` under `deps`.
    ///
    /// `now` stands in for a missing `started_at` when ordering the path.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::CyclicDependency`] if the known edges form a cycle.
    /// Checked in both pass orders.
    pub fn analyze(
        &self,
        tasks: &[Task],
        deps: &[TaskDependency],
        now: DateTime<Utc>,
    ) -> Result<ScheduleReport, ScheduleError> {
        let graph = DependencyGraph::build(tasks, deps);
        Ok(self.run(&graph, now)?.0)
    }

    /// The critical path as tasks, ordered by `started_at`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::analyze`].
    pub fn critical_tasks(
        &self,
        tasks: &[Task],
        deps: &[TaskDependency],
        now: DateTime<Utc>,
    ) -> Result<Vec<Task>, ScheduleError> {
        let graph = DependencyGraph::build(tasks, deps);
        let (_, path) = self.run(&graph, now)?;
        let distinct: Vec<&Task> = graph.tasks().collect();
        Ok(path.into_iter().map(|pos| distinct[pos].clone()).collect())
    }

    fn run(
        &self,
        graph: &DependencyGraph<'_>,
        now: DateTime<Utc>,
    ) -> Result<(ScheduleReport, Vec<usize>), ScheduleError> {
        let topo = graph.topological_order()?;
        let n = graph.node_count();
        let order = match self.pass_order {
            PassOrder::Topological => topo,
            PassOrder::InputOrder => {
                warn!(
                    "critical path computed in input order; predecessors listed after \
                     their successors are missed"
                );
                (0..n).collect()
            }
        };

        let tasks: Vec<&Task> = graph.tasks().collect();
        let duration: Vec<f64> = tasks.iter().map(|t| sanitize_secs(t.time_spent)).collect();

        let mut es = vec![0.0; n];
        let mut ef = duration.clone();
        for &pos in &order {
            for pred in graph.predecessors(pos) {
                if ef[pred] > es[pos] {
                    es[pos] = ef[pred];
                    ef[pos] = es[pos] + duration[pos];
                }
            }
        }

        let max_finish = ef.iter().copied().fold(0.0, f64::max);

        let mut lf = vec![max_finish; n];
        let mut ls: Vec<f64> = duration.iter().map(|d| max_finish - d).collect();
        for &pos in order.iter().rev() {
            let mut latest = max_finish;
            for succ in graph.successors(pos) {
                latest = latest.min(ls[succ]);
            }
            lf[pos] = latest;
            ls[pos] = latest - duration[pos];
        }

        let nodes: Vec<ScheduleNode> = (0..n)
            .map(|pos| ScheduleNode {
                task_id: tasks[pos].id.clone(),
                duration: duration[pos],
                earliest_start: es[pos],
                earliest_finish: ef[pos],
                latest_start: ls[pos],
                latest_finish: lf[pos],
                slack: lf[pos] - ef[pos],
            })
            .collect();

        let mut path: Vec<usize> = (0..n).filter(|&pos| nodes[pos].is_critical()).collect();
        path.sort_by_key(|&pos| tasks[pos].started_at.unwrap_or(now));

        debug!(
            tasks = n,
            edges = graph.edge_count(),
            skipped = graph.skipped_edges(),
            critical = path.len(),
            max_finish,
            pass_order = %self.pass_order,
            "critical path analyzed"
        );

        let report = ScheduleReport {
            critical_path: path.iter().map(|&pos| tasks[pos].id.clone()).collect(),
            nodes,
            max_finish,
            skipped_edges: graph.skipped_edges(),
            pass_order: self.pass_order,
        };
        Ok((report, path))
    }
}

/// Critical path of `tasks` with the default (topological) pass order.
///
/// # Errors
///
/// [`ScheduleError::CyclicDependency`] if the known edges form a cycle.
pub fn analyze_critical_path(
    tasks: &[Task],
    deps: &[TaskDependency],
    now: DateTime<Utc>,
) -> Result<Vec<Task>, ScheduleError> {
    CriticalPathAnalyzer::default().critical_tasks(tasks, deps, now)
}
