//! Critical path analyzer configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order in which the forward and backward CPM passes visit tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassOrder {
    /// Dependency order: every predecessor is settled before its successors.
    #[default]
    Topological,
    /// Caller's list order, one pass each way. Misses predecessors listed
    /// after their successors; kept for parity with existing reports.
    InputOrder,
}

impl PassOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Topological => "topological",
            Self::InputOrder => "input_order",
        }
    }
}

impl fmt::Display for PassOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScheduleConfig {
    #[serde(default)]
    pub pass_order: PassOrder,
}
