//! Core types and traits for the quiver tool harness.
//!
//! This crate provides the run configuration, the target/task data model,
//! error handling, and the [`ToolModule`] trait that concrete tool
//! integrations implement.

/// Run configuration shared by the harness and tool modules.
pub mod config;
/// Error types and result definitions.
pub mod error;
/// Trait definition for tool modules.
pub mod traits;
/// Core data types for targets, tasks, and their outcomes.
pub mod types;

pub use config::{DEFAULT_THREADS, DEFAULT_TIMEOUT_SECS, RunConfig};
pub use error::{Error, Result};
pub use traits::ToolModule;
pub use types::{Target, Task, TaskOutcome, TaskReport};
