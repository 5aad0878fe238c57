//! Work session tracking.
//!
//! Sessions fold into `time_spent`: closing a session adds its duration, so
//! `time_spent` only grows and matches [`closed_session_total`] for tasks
//! whose time was recorded here.

use chrono::{DateTime, Utc};
use tracing::debug;

use nahda_core::activity::ActivityKind;
use nahda_core::entities::{Task, TaskActivity, WorkSession};
use nahda_core::ids::{PREFIX_SESSION, generate_id};
use nahda_core::patch::{SessionClose, TaskPatch, TaskPatchBuilder};
use nahda_core::timing::{sanitize_secs, seconds_between};

use crate::error::{SessionConflict, SessionError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    Start { user_id: String },
    End { session_id: String },
}

/// Dispatch `action` to [`start_session`] or [`end_session`].
///
/// # Errors
///
/// See the dispatched function.
pub fn apply_work_session(
    task: &Task,
    action: &SessionAction,
    now: DateTime<Utc>,
) -> Result<TaskPatch, SessionError> {
    match action {
        SessionAction::Start { user_id } => start_session(task, user_id, now),
        SessionAction::End { session_id } => end_session(task, session_id, now),
    }
}

/// Open a session for `user_id`. Stamps `started_at` if the task has none.
///
/// # Errors
///
/// [`SessionError::SessionConflict`] if the user already has an open session
/// on this task.
pub fn start_session(
    task: &Task,
    user_id: &str,
    now: DateTime<Utc>,
) -> Result<TaskPatch, SessionError> {
    if let Some(open) = task.open_session_for(user_id) {
        return Err(SessionError::SessionConflict {
            task_id: task.id.clone(),
            conflict: SessionConflict::AlreadyOpen {
                user_id: user_id.to_string(),
                session_id: open.id.clone(),
            },
        });
    }

    let session = WorkSession {
        id: generate_id(PREFIX_SESSION)?,
        start_time: now,
        end_time: None,
        duration: 0.0,
        user_id: user_id.to_string(),
    };
    let activity = TaskActivity::record(
        user_id,
        ActivityKind::SessionStarted {
            session_id: session.id.clone(),
        },
        now,
    )?;
    debug!(task_id = %task.id, session_id = %session.id, user_id, "session started");

    let mut builder = TaskPatchBuilder::for_task(task).open_session(session);
    if task.started_at.is_none() {
        builder = builder.started_at(now);
    }
    Ok(builder.activity(activity).build())
}

/// Close `session_id` at `now` and add its duration to `time_spent`.
///
/// Also stamps `completed_at = now` as the task's last-activity mark.
///
/// # Errors
///
/// [`SessionError::SessionConflict`] if no such session exists or it is
/// already closed.
pub fn end_session(
    task: &Task,
    session_id: &str,
    now: DateTime<Utc>,
) -> Result<TaskPatch, SessionError> {
    let conflict = |conflict| SessionError::SessionConflict {
        task_id: task.id.clone(),
        conflict,
    };

    let Some(index) = task.work_sessions.iter().position(|s| s.id == session_id) else {
        return Err(conflict(SessionConflict::UnknownSession {
            session_id: session_id.to_string(),
        }));
    };
    let open = &task.work_sessions[index];
    if !open.is_open() {
        return Err(conflict(SessionConflict::AlreadyClosed {
            session_id: session_id.to_string(),
        }));
    }

    let duration = seconds_between(open.start_time, now).max(0.0);
    let activity = TaskActivity::record(
        &open.user_id,
        ActivityKind::SessionEnded {
            session_id: session_id.to_string(),
            duration,
        },
        now,
    )?;
    debug!(task_id = %task.id, session_id, duration, "session ended");

    Ok(TaskPatchBuilder::for_task(task)
        .close_session(SessionClose {
            session_id: session_id.to_string(),
            end_time: now,
            duration,
        })
        .completed_at(now)
        .activity(activity)
        .build())
}

/// Sum of the durations of all closed sessions on `task`.
#[must_use]
pub fn closed_session_total(task: &Task) -> f64 {
    task.work_sessions
        .iter()
        .filter(|s| !s.is_open())
        .map(|s| sanitize_secs(s.duration))
        .sum()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};
    use pretty_assertions::assert_eq;

    use super::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 3, 9, 0, 0).unwrap()
    }

    fn task() -> Task {
        serde_json::from_value(serde_json::json!({
            "id": "tsk-1",
            "team_id": "tem-1",
            "title": "Inspect valves",
            "assigned_to_id": "usr-amal",
        }))
        .unwrap()
    }

    fn open_session_id(task: &Task, user: &str) -> String {
        task.open_session_for(user).unwrap().id.clone()
    }

    #[test]
    fn start_stamps_started_at_once() {
        let mut task = task();
        start_session(&task, "usr-amal", t0())
            .unwrap()
            .apply_to(&mut task)
            .unwrap();
        assert_eq!(task.started_at, Some(t0()));
        assert!(task.is_active());

        let later = t0() + TimeDelta::hours(1);
        let patch = start_session(&task, "usr-omar", later).unwrap();
        assert_eq!(patch.started_at, None);
        patch.apply_to(&mut task).unwrap();
        assert_eq!(task.started_at, Some(t0()));
        assert_eq!(task.work_sessions.len(), 2);
    }

    #[test]
    fn second_open_session_for_same_user_conflicts() {
        let mut task = task();
        start_session(&task, "usr-amal", t0())
            .unwrap()
            .apply_to(&mut task)
            .unwrap();
        let err = start_session(&task, "usr-amal", t0()).unwrap_err();
        assert!(matches!(
            err,
            SessionError::SessionConflict {
                conflict: SessionConflict::AlreadyOpen { .. },
                ..
            }
        ));
    }

    #[test]
    fn end_unknown_or_closed_session_conflicts() {
        let mut task = task();
        let err = end_session(&task, "wss-nope", t0()).unwrap_err();
        assert!(matches!(
            err,
            SessionError::SessionConflict {
                conflict: SessionConflict::UnknownSession { .. },
                ..
            }
        ));

        start_session(&task, "usr-amal", t0())
            .unwrap()
            .apply_to(&mut task)
            .unwrap();
        let id = open_session_id(&task, "usr-amal");
        end_session(&task, &id, t0() + TimeDelta::minutes(5))
            .unwrap()
            .apply_to(&mut task)
            .unwrap();
        let err = end_session(&task, &id, t0() + TimeDelta::minutes(6)).unwrap_err();
        assert!(matches!(
            err,
            SessionError::SessionConflict {
                conflict: SessionConflict::AlreadyClosed { .. },
                ..
            }
        ));
    }

    #[test]
    fn time_spent_tracks_closed_sessions() {
        let mut task = task();
        let mut now = t0();
        let mut previous = 0.0;
        for minutes in [25, 0, 50, 5] {
            start_session(&task, "usr-amal", now)
                .unwrap()
                .apply_to(&mut task)
                .unwrap();
            let id = open_session_id(&task, "usr-amal");
            now += TimeDelta::minutes(minutes);
            apply_work_session(&task, &SessionAction::End { session_id: id }, now)
                .unwrap()
                .apply_to(&mut task)
                .unwrap();

            assert!(task.time_spent >= previous);
            previous = task.time_spent;
            assert!((task.time_spent - closed_session_total(&task)).abs() < 1e-9);
            now += TimeDelta::minutes(10);
        }
        assert!((task.time_spent - 80.0 * 60.0).abs() < 1e-9);
        assert_eq!(task.completed_at, Some(now - TimeDelta::minutes(10)));
    }

    #[test]
    fn clock_skew_yields_zero_duration() {
        let mut task = task();
        start_session(&task, "usr-amal", t0())
            .unwrap()
            .apply_to(&mut task)
            .unwrap();
        let id = open_session_id(&task, "usr-amal");
        let patch = end_session(&task, &id, t0() - TimeDelta::seconds(30)).unwrap();
        assert_eq!(patch.close_session.map(|c| c.duration), Some(0.0));
    }

    #[test]
    fn session_activities_are_logged_in_order() {
        let mut task = task();
        apply_work_session(
            &task,
            &SessionAction::Start {
                user_id: "usr-amal".into(),
            },
            t0(),
        )
        .unwrap()
        .apply_to(&mut task)
        .unwrap();
        let id = open_session_id(&task, "usr-amal");
        end_session(&task, &id, t0() + TimeDelta::seconds(90))
            .unwrap()
            .apply_to(&mut task)
            .unwrap();

        let actions: Vec<&str> = task.activity_log.iter().map(|a| a.kind.as_str()).collect();
        assert_eq!(actions, vec!["session_started", "session_ended"]);
        assert_eq!(
            task.activity_log[1].kind,
            ActivityKind::SessionEnded {
                session_id: id,
                duration: 90.0,
            }
        );
    }
}
