use chrono::{TimeDelta, TimeZone, Utc};
use nahda_analytics::{
    PerformanceMetrics, Period, TeamAnalytics, TeamVelocity, TimeAnalytics, activity_feed,
};
use nahda_config::EngineConfig;
use nahda_core::enums::CompletionTrend;
use nahda_core::snapshot::Snapshot;
use pretty_assertions::assert_eq;

fn snapshot() -> Snapshot {
    serde_json::from_value(serde_json::json!({
        "team": {"id": "tem-1", "name": "Clinic", "leader_id": "usr-lead",
                 "member_ids": ["usr-a", "usr-b"]},
        "tasks": [
            {"id": "tsk-1", "team_id": "tem-1", "title": "Stock", "assigned_to_id": "usr-a",
             "description": "Restock shelves", "priority": "high",
             "status": "completed", "is_completed": true, "finish_time": 7200.0,
             "started_at": "2026-09-01T08:00:00Z", "completed_at": "2026-09-01T10:00:00Z",
             "due_date": "2026-09-02T00:00:00Z",
             "activity_log": [
                 {"id": "act-1", "user_id": "usr-lead", "timestamp": "2026-09-01T10:00:00Z",
                  "action": "approved", "finish_time": 7200.0}
             ]},
            {"id": "tsk-2", "team_id": "tem-1", "title": "Audit", "assigned_to_id": "usr-a",
             "description": "Audit records", "priority": "high",
             "status": "completed", "is_completed": true, "finish_time": 3600.0,
             "started_at": "2026-09-05T08:00:00Z", "completed_at": "2026-09-05T09:00:00Z",
             "due_date": "2026-09-04T00:00:00Z"},
            {"id": "tsk-3", "team_id": "tem-1", "title": "Clean", "assigned_to_id": "usr-b",
             "priority": "low", "status": "in_progress",
             "started_at": "2026-09-06T08:00:00Z", "time_spent": 1800.0,
             "activity_log": [
                 {"id": "act-2", "user_id": "usr-b", "timestamp": "2026-09-06T08:00:00Z",
                  "action": "session_started", "session_id": "wss-1"}
             ]}
        ]
    }))
    .unwrap()
}

#[test]
fn snapshot_metrics_hold_together() {
    let snapshot = snapshot();
    let config = EngineConfig::default();
    let now = Utc.with_ymd_and_hms(2026, 9, 8, 0, 0, 0).unwrap();

    let period = Period::trailing(now, TimeDelta::weeks(1));
    let metrics = PerformanceMetrics::calculate("usr-a", &snapshot.tasks, period);
    assert_eq!(metrics.tasks_completed, 2);
    assert_eq!(metrics.average_task_duration, 5400.0);
    assert_eq!(metrics.on_time_completion_rate, 0.5);
    assert!((metrics.velocity_score - 2.0).abs() < 1e-12);

    let analytics = TimeAnalytics::with_config(&snapshot.tasks, &config.analytics);
    assert_eq!(analytics.completion_trend(), CompletionTrend::Improving);
    let estimate = analytics.estimate_completion_time(&snapshot.tasks[2]);
    assert_eq!(estimate, 5400.0);

    let sprint = TimeDelta::days(i64::from(config.analytics.sprint_days));
    let velocity = TeamVelocity::calculate_current(&snapshot.team.id, &snapshot.tasks, sprint, now);
    assert_eq!(velocity.completed_points, 2);
    assert_eq!(velocity.completion_rate, 1.0);

    let team = TeamAnalytics::calculate(&snapshot.team, &snapshot.tasks);
    assert!((team.completion_rate - 2.0 / 3.0).abs() < 1e-12);

    let feed = activity_feed(&snapshot.tasks);
    assert_eq!(feed[0].task_id, "tsk-3");
    assert_eq!(feed[1].activity.kind.as_str(), "approved");
}
