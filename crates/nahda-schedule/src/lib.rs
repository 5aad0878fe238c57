//! # nahda-schedule
//!
//! Critical path method (CPM) over a snapshot of tasks and their
//! dependency edges. Task durations come from accumulated `time_spent`;
//! every computation is pure and repeated in full on each call.

pub mod error;
pub mod graph;
pub mod cpm;

pub use cpm::{CriticalPathAnalyzer, SLACK_EPSILON, ScheduleNode, ScheduleReport, analyze_critical_path};
pub use error::ScheduleError;
