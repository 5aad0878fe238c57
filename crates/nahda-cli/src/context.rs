//! Snapshot-backed application state shared by command handlers.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use nahda_config::EngineConfig;
use nahda_core::entities::Task;
use nahda_core::snapshot::Snapshot;
use nahda_lifecycle::TransitionContext;
use nahda_lifecycle::store::MemoryTaskStore;

use crate::cli::GlobalFlags;

pub struct AppContext {
    pub snapshot_path: PathBuf,
    pub snapshot: Snapshot,
    pub config: EngineConfig,
    /// Evaluation instant for every time-dependent computation.
    pub now: DateTime<Utc>,
}

impl AppContext {
    /// Read the snapshot named by `--snapshot`.
    pub fn init(flags: &GlobalFlags, config: EngineConfig) -> anyhow::Result<Self> {
        let snapshot = read_snapshot(&flags.snapshot)?;
        tracing::debug!(
            path = %flags.snapshot.display(),
            team = %snapshot.team.id,
            tasks = snapshot.tasks.len(),
            "snapshot loaded"
        );
        Ok(Self {
            snapshot_path: flags.snapshot.clone(),
            snapshot,
            config,
            now: flags.now.unwrap_or_else(Utc::now),
        })
    }

    pub fn task(&self, id: &str) -> anyhow::Result<&Task> {
        self.snapshot
            .task(id)
            .with_context(|| format!("task '{id}' not found in snapshot"))
    }

    pub fn transition_ctx(&self, actor: &str) -> TransitionContext {
        TransitionContext::new(actor, self.snapshot.team.reference(), self.now)
    }

    /// Run `f` against a store seeded with the snapshot's tasks, then write
    /// the store's contents back to the snapshot file.
    ///
    /// Nothing is written when `f` fails.
    pub fn with_store<T>(
        &mut self,
        f: impl FnOnce(&MemoryTaskStore) -> anyhow::Result<T>,
    ) -> anyhow::Result<T> {
        let store = MemoryTaskStore::new(self.snapshot.tasks.clone());
        let value = f(&store)?;
        self.snapshot.tasks = store.into_tasks()?;
        write_snapshot(&self.snapshot_path, &self.snapshot)?;
        Ok(value)
    }
}

pub fn read_snapshot(path: &Path) -> anyhow::Result<Snapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse snapshot '{}'", path.display()))
}

pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> anyhow::Result<()> {
    let mut json = serde_json::to_string_pretty(snapshot)?;
    json.push('\n');
    std::fs::write(path, json)
        .with_context(|| format!("failed to write snapshot '{}'", path.display()))
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use crate::cli::OutputFormat;

    use super::*;

    pub fn sample_snapshot() -> Snapshot {
        serde_json::from_value(serde_json::json!({
            "team": {"id": "tem-1", "name": "Facilities", "leader_id": "usr-lead",
                     "member_ids": ["usr-a", "usr-b"]},
            "tasks": [
                {"id": "tsk-1", "team_id": "tem-1", "title": "Survey", "assigned_to_id": "usr-a",
                 "status": "completed", "is_completed": true, "time_spent": 3600.0,
                 "finish_time": 3600.0, "priority": "high",
                 "started_at": "2026-10-01T08:00:00Z", "completed_at": "2026-10-01T09:00:00Z"},
                {"id": "tsk-2", "team_id": "tem-1", "title": "Repair", "assigned_to_id": "usr-a",
                 "status": "in_progress", "time_spent": 7200.0, "priority": "high",
                 "started_at": "2026-10-02T08:00:00Z", "depends_on": ["tsk-1"]},
                {"id": "tsk-3", "team_id": "tem-1", "title": "Paint", "assigned_to_id": "usr-b",
                 "status": "in_progress", "time_spent": 1800.0, "priority": "low",
                 "started_at": "2026-10-02T09:00:00Z"}
            ]
        }))
        .expect("sample snapshot should deserialize")
    }

    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 3, 12, 0, 0).unwrap()
    }

    /// Write the sample snapshot into `dir` and build a context over it.
    pub fn context_in(dir: &Path) -> (AppContext, GlobalFlags) {
        let path = dir.join("nahda.json");
        write_snapshot(&path, &sample_snapshot()).expect("write snapshot");
        let flags = GlobalFlags {
            format: OutputFormat::Raw,
            quiet: true,
            verbose: false,
            snapshot: path,
            config: None,
            now: Some(now()),
        };
        let ctx = AppContext::init(&flags, EngineConfig::default()).expect("init context");
        (ctx, flags)
    }

    #[test]
    fn init_reads_snapshot_and_pins_now() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, _) = context_in(dir.path());
        assert_eq!(ctx.snapshot.tasks.len(), 3);
        assert_eq!(ctx.now, now());
        assert_eq!(ctx.task("tsk-2").unwrap().title, "Repair");
        assert!(ctx.task("tsk-9").is_err());
    }

    #[test]
    fn missing_snapshot_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let error = read_snapshot(&path).unwrap_err();
        assert!(format!("{error:#}").contains("absent.json"));
    }

    #[test]
    fn failed_mutation_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ctx, flags) = context_in(dir.path());
        let before = std::fs::read_to_string(&flags.snapshot).unwrap();

        let result: anyhow::Result<()> = ctx.with_store(|_| anyhow::bail!("rejected"));
        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&flags.snapshot).unwrap(), before);
    }
}
