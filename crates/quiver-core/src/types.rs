use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// One unit of work for the tool: an opaque identifier (host, file, URL)
/// plus the output location the tool should write for it.
///
/// Targets are produced once by enumeration and read-only afterwards.
/// Duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Opaque target identifier.
    pub ident: String,
    /// Output path associated with this target.
    pub output: PathBuf,
}

impl Target {
    /// Creates a target from an identifier and its output path.
    pub fn new<S: Into<String>, P: Into<PathBuf>>(ident: S, output: P) -> Self {
        Self {
            ident: ident.into(),
            output: output.into(),
        }
    }
}

/// A templated command ready for dispatch, consumed by the executor pool.
#[derive(Debug, Clone)]
pub struct Task {
    /// Argument vector; the first element is the program to start.
    pub args: Vec<String>,
    /// How long the pool waits for the process before timing out.
    pub timeout: Duration,
}

impl Task {
    /// Creates a task from an argument vector and a timeout.
    #[must_use]
    pub fn new(args: Vec<String>, timeout: Duration) -> Self {
        Self { args, timeout }
    }

    /// The argument vector joined for display.
    #[must_use]
    pub fn command_line(&self) -> String {
        self.args.join(" ")
    }
}

/// Terminal state of one dispatched task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TaskOutcome {
    /// The process exited within the timeout.
    Completed {
        /// Exit code, `None` when the process was ended by a signal.
        exit_code: Option<i32>,
    },
    /// The timeout elapsed before the process exited; the process was
    /// killed and reaped.
    TimedOut,
    /// The process could not be started or waited on.
    Failed {
        /// Why the process never reached a normal exit.
        reason: String,
    },
}

impl TaskOutcome {
    /// Whether the process exited on its own within the timeout.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Whether the task hit its timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TimedOut)
    }

    /// Whether the process exited with code zero.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed { exit_code: Some(0) })
    }
}

/// Per-task record returned by the executor pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskReport {
    /// The argument vector that was dispatched.
    pub args: Vec<String>,
    /// Terminal outcome of the task.
    pub outcome: TaskOutcome,
    /// Wall-clock time from process start to terminal state.
    pub duration: Duration,
}

impl TaskReport {
    /// The argument vector joined for display.
    #[must_use]
    pub fn command_line(&self) -> String {
        self.args.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_predicates() {
        let completed = TaskOutcome::Completed { exit_code: Some(0) };
        assert!(completed.is_completed());
        assert!(completed.is_success());
        assert!(!completed.is_timeout());

        let nonzero = TaskOutcome::Completed { exit_code: Some(2) };
        assert!(nonzero.is_completed());
        assert!(!nonzero.is_success());

        let timed_out = TaskOutcome::TimedOut;
        assert!(timed_out.is_timeout());
        assert!(!timed_out.is_success());
    }

    #[test]
    fn test_outcome_serialization_tags() {
        let json = serde_json::to_string(&TaskOutcome::TimedOut).unwrap();
        assert!(json.contains("timed_out"));

        let json =
            serde_json::to_string(&TaskOutcome::Completed { exit_code: Some(1) }).unwrap();
        assert!(json.contains("completed"));
        assert!(json.contains("exit_code"));
    }

    #[test]
    fn test_command_line_display() {
        let task = Task::new(
            vec!["scan".to_owned(), "10.0.0.1".to_owned()],
            Duration::from_secs(5),
        );
        assert_eq!(task.command_line(), "scan 10.0.0.1");
    }
}
