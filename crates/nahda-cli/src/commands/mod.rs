pub mod activity;
pub mod burndown;
pub mod create;
pub mod critical_path;
pub mod dispatch;
pub mod edit;
pub mod estimate;
pub mod metrics;
pub mod session;
pub mod shared;
pub mod team_stats;
pub mod transition;
pub mod trend;
pub mod velocity;
