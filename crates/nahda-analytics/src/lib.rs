//! # nahda-analytics
//!
//! Read-only metrics derived from a snapshot of tasks: per-user performance,
//! similarity-weighted completion estimates, completion trends, team velocity,
//! burndown series, and the merged activity feed.
//!
//! Nothing here fails. Missing or malformed durations count as zero and empty
//! inputs produce zeroed metrics.

pub mod burndown;
pub mod feed;
pub mod performance;
pub mod period;
pub mod team;
pub mod time;
pub mod velocity;

pub use burndown::{Burndown, BurndownPoint, burndown};
pub use feed::{FeedEntry, activity_feed};
pub use performance::PerformanceMetrics;
pub use period::Period;
pub use team::{PriorityStatistics, TeamAnalytics};
pub use time::TimeAnalytics;
pub use velocity::TeamVelocity;

use nahda_core::entities::Task;
use nahda_core::timing::sanitize_secs;

/// Approval-recorded finish time of a completed task.
pub(crate) fn finish_secs(task: &Task) -> Option<f64> {
    if task.is_completed {
        task.finish_time.map(sanitize_secs)
    } else {
        None
    }
}

/// `part / whole`, or 0 when `whole` is 0.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Arithmetic mean, or 0 for no values.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
