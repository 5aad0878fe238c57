use serde::{Deserialize, Serialize};

use nahda_core::entities::{Task, TaskActivity};

/// One activity with the task it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub task_id: String,
    pub task_title: String,
    pub activity: TaskActivity,
}

/// Every task's activity log merged, newest first. Entries with equal
/// timestamps keep task order.
#[must_use]
pub fn activity_feed(tasks: &[Task]) -> Vec<FeedEntry> {
    let mut feed: Vec<FeedEntry> = tasks
        .iter()
        .flat_map(|task| {
            task.activity_log.iter().map(|activity| FeedEntry {
                task_id: task.id.clone(),
                task_title: task.title.clone(),
                activity: activity.clone(),
            })
        })
        .collect();
    feed.sort_by(|a, b| b.activity.timestamp.cmp(&a.activity.timestamp));
    feed
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone, Utc};
    use nahda_core::activity::ActivityKind;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn merges_logs_newest_first() {
        let base = Utc.with_ymd_and_hms(2026, 10, 2, 9, 0, 0).unwrap();
        let entry = |id: &str, minutes: i64| TaskActivity {
            id: id.into(),
            user_id: "usr-1".into(),
            timestamp: base + TimeDelta::minutes(minutes),
            kind: ActivityKind::Resumed,
        };
        let mut first: Task = serde_json::from_value(serde_json::json!({
            "id": "tsk-1", "team_id": "tem-1", "title": "One", "assigned_to_id": "usr-1",
        }))
        .unwrap();
        let mut second = first.clone();
        second.id = "tsk-2".into();
        second.title = "Two".into();
        first.activity_log = vec![entry("act-1", 0), entry("act-3", 20)];
        second.activity_log = vec![entry("act-2", 10), entry("act-4", 20)];

        let ids: Vec<String> = activity_feed(&[first, second])
            .into_iter()
            .map(|e| format!("{}:{}", e.task_id, e.activity.id))
            .collect();
        assert_eq!(ids, vec!["tsk-1:act-3", "tsk-2:act-4", "tsk-2:act-2", "tsk-1:act-1"]);
    }
}
