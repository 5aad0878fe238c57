//! Status, priority, dependency, and trend enums for Nahda.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `TaskStatus` provides `allowed_next_states()` to enforce valid transitions
//! before any guard is evaluated.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// TaskStatus
// ---------------------------------------------------------------------------

/// Status of a task through its approval lifecycle.
///
/// ```text
/// todo → in_progress → pending_approval → completed
///                                       → rejected → in_progress (resume)
/// ```
///
/// New tasks start in `in_progress`; `todo` is reachable but unused by the
/// engine itself. Reassignment keeps the current status and is not listed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    #[default]
    InProgress,
    PendingApproval,
    Completed,
    Rejected,
}

impl TaskStatus {
    pub const ALL: [Self; 5] = [
        Self::Todo,
        Self::InProgress,
        Self::PendingApproval,
        Self::Completed,
        Self::Rejected,
    ];

    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Todo => &[Self::InProgress],
            Self::InProgress => &[Self::PendingApproval],
            Self::PendingApproval => &[Self::Completed, Self::Rejected],
            Self::Rejected => &[Self::InProgress],
            Self::Completed => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Whether the assignee may still be changed.
    #[must_use]
    pub const fn is_reassignable(self) -> bool {
        matches!(self, Self::Todo | Self::InProgress | Self::Rejected)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::PendingApproval => "pending_approval",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TaskPriority
// ---------------------------------------------------------------------------

/// Priority of a task.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DependencyKind
// ---------------------------------------------------------------------------

/// Scheduling relation between a task and its predecessor.
///
/// Only `finish_to_start` has dedicated semantics in the critical path
/// analyzer; the other kinds are evaluated as finish-to-start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    /// B can't start until A finishes.
    #[default]
    #[serde(alias = "FS")]
    FinishToStart,
    /// B can't start until A starts.
    #[serde(alias = "SS")]
    StartToStart,
    /// B can't finish until A finishes.
    #[serde(alias = "FF")]
    FinishToFinish,
    /// B can't finish until A starts.
    #[serde(alias = "SF")]
    StartToFinish,
}

impl DependencyKind {
    /// Short scheduling code (`FS`, `SS`, `FF`, `SF`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::FinishToStart => "FS",
            Self::StartToStart => "SS",
            Self::FinishToFinish => "FF",
            Self::StartToFinish => "SF",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FinishToStart => "finish_to_start",
            Self::StartToStart => "start_to_start",
            Self::FinishToFinish => "finish_to_finish",
            Self::StartToFinish => "start_to_finish",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CompletionTrend
// ---------------------------------------------------------------------------

/// Direction of recent completion times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CompletionTrend {
    /// Completion times are shrinking.
    Improving,
    #[default]
    Stable,
    /// Completion times are growing.
    Slowing,
}

impl CompletionTrend {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Stable => "stable",
            Self::Slowing => "slowing",
        }
    }
}

impl fmt::Display for CompletionTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DepartmentType
// ---------------------------------------------------------------------------

/// Whether a team is a top-level team or a sub-team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DepartmentType {
    #[default]
    MainTeam,
    SubTeam,
}

impl DepartmentType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MainTeam => "main_team",
            Self::SubTeam => "sub_team",
        }
    }
}

impl fmt::Display for DepartmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // --- Serde roundtrip tests ---

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(
        status_pending_approval,
        TaskStatus,
        TaskStatus::PendingApproval,
        "pending_approval"
    );
    test_serde_roundtrip!(
        status_in_progress,
        TaskStatus,
        TaskStatus::InProgress,
        "in_progress"
    );
    test_serde_roundtrip!(priority_high, TaskPriority, TaskPriority::High, "high");
    test_serde_roundtrip!(
        dependency_finish_to_finish,
        DependencyKind,
        DependencyKind::FinishToFinish,
        "finish_to_finish"
    );
    test_serde_roundtrip!(
        trend_slowing,
        CompletionTrend,
        CompletionTrend::Slowing,
        "slowing"
    );
    test_serde_roundtrip!(
        department_sub_team,
        DepartmentType,
        DepartmentType::SubTeam,
        "sub_team"
    );

    #[test]
    fn dependency_kind_accepts_short_codes() {
        for kind in [
            DependencyKind::FinishToStart,
            DependencyKind::StartToStart,
            DependencyKind::FinishToFinish,
            DependencyKind::StartToFinish,
        ] {
            let json = format!("\"{}\"", kind.code());
            let parsed: DependencyKind = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, kind);
        }
    }

    // --- Transition tests ---

    #[test]
    fn task_valid_transitions() {
        assert!(TaskStatus::Todo.can_transition_to(TaskStatus::InProgress));
        assert!(TaskStatus::InProgress.can_transition_to(TaskStatus::PendingApproval));
        assert!(TaskStatus::PendingApproval.can_transition_to(TaskStatus::Completed));
        assert!(TaskStatus::PendingApproval.can_transition_to(TaskStatus::Rejected));
        assert!(TaskStatus::Rejected.can_transition_to(TaskStatus::InProgress));
    }

    #[test]
    fn task_invalid_transitions() {
        assert!(!TaskStatus::InProgress.can_transition_to(TaskStatus::Completed));
        assert!(!TaskStatus::Todo.can_transition_to(TaskStatus::PendingApproval));
        assert!(!TaskStatus::Rejected.can_transition_to(TaskStatus::Completed));
        assert!(!TaskStatus::PendingApproval.can_transition_to(TaskStatus::InProgress));
    }

    #[test]
    fn completed_is_the_only_terminal_state() {
        for status in TaskStatus::ALL {
            assert_eq!(
                status.allowed_next_states().is_empty(),
                status.is_terminal(),
                "{status}"
            );
        }
    }

    #[test]
    fn reassignable_states() {
        assert!(TaskStatus::InProgress.is_reassignable());
        assert!(TaskStatus::Rejected.is_reassignable());
        assert!(!TaskStatus::PendingApproval.is_reassignable());
        assert!(!TaskStatus::Completed.is_reassignable());
    }

    #[test]
    fn defaults_match_new_task_shape() {
        assert_eq!(TaskStatus::default(), TaskStatus::InProgress);
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);
        assert_eq!(DependencyKind::default(), DependencyKind::FinishToStart);
    }

    // --- Display / as_str tests ---

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", TaskStatus::PendingApproval), "pending_approval");
        assert_eq!(format!("{}", TaskPriority::Low), "low");
        assert_eq!(format!("{}", DependencyKind::StartToFinish), "start_to_finish");
        assert_eq!(format!("{}", CompletionTrend::Improving), "improving");
        assert_eq!(format!("{}", DepartmentType::MainTeam), "main_team");
    }
}
