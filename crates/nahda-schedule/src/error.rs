//! Schedule error types for nahda-schedule.

/// Errors from critical path analysis.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// The dependency graph contains at least one cycle. Lists every task
    /// that lies on a cycle, in input order.
    #[error("cyclic dependency among tasks: {}", task_ids.join(", "))]
    CyclicDependency { task_ids: Vec<String> },
}
