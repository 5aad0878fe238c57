//! Entity structs for the Nahda task records.
//!
//! Each entity mirrors a document (or embedded sub-document) in the team's
//! document store. All structs derive `Serialize`, `Deserialize`, and
//! `JsonSchema` for JSON roundtrip and schema validation.

mod activity;
mod completion;
mod dependency;
mod session;
mod task;
mod team;

pub use activity::TaskActivity;
pub use completion::CompletionRequest;
pub use dependency::TaskDependency;
pub use session::WorkSession;
pub use task::{Task, TaskDraft};
pub use team::{Team, TeamRef};
