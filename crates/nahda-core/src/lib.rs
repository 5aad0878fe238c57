//! # nahda-core
//!
//! Core types for the Nahda task scheduling and analytics engine.
//!
//! This crate provides the foundational types shared across all Nahda crates:
//! - Entity structs for tasks, dependencies, work sessions, and teams
//! - Status enums with state machine transitions
//! - Typed activity log payloads
//! - `TaskPatch`, the mutation record handed back to the document store
//! - ID prefix constants and generation
//! - Cross-cutting error types

pub mod activity;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod patch;
pub mod snapshot;
pub mod timing;

pub use errors::CoreError;
