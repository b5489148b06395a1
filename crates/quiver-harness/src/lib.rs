//! Execution harness for running an external tool across a target list.
//!
//! The harness resolves the tool binary, templates one command per target,
//! dispatches the commands through a bounded worker pool with a per-task
//! timeout, and hands the full target list to the module's output
//! processing once every task has reached a terminal outcome.

/// Bounded-concurrency dispatch of external processes.
pub mod executor;
/// Tool binary resolution.
pub mod resolver;
/// Run orchestration: resolve, enumerate, dispatch, process.
pub mod runner;
/// Command templating with shell-word semantics.
pub mod template;

pub use executor::ExecutorPool;
pub use resolver::resolve_binary;
pub use runner::{RunReport, ToolRunner};
pub use template::CommandTemplate;
