//! ID prefixes and generation.
//!
//! IDs have the form `{prefix}-{8 hex chars}`, e.g. `tsk-a3f8b2c1`. Tasks
//! normally receive their ID from the document store; the engine only mints
//! IDs for records it creates itself (activities, work sessions, drafts).

use crate::errors::CoreError;

pub const PREFIX_TASK: &str = "tsk";
pub const PREFIX_ACTIVITY: &str = "act";
pub const PREFIX_SESSION: &str = "wss";
pub const PREFIX_TEAM: &str = "tem";

/// Generate a new random ID with the given prefix.
///
/// # Errors
///
/// Returns [`CoreError::IdGeneration`] if the OS random source fails.
pub fn generate_id(prefix: &str) -> Result<String, CoreError> {
    let mut bytes = [0u8; 4];
    getrandom::fill(&mut bytes).map_err(|e| CoreError::IdGeneration(e.to_string()))?;
    let suffix: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    Ok(format!("{prefix}-{suffix}"))
}

/// Whether `id` carries the given prefix.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|rest| !rest.is_empty())
}
