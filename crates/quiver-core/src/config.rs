//! Run configuration shared by the harness and tool modules.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default number of worker slots in the executor pool.
pub const DEFAULT_THREADS: usize = 10;

/// Default per-task timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Immutable configuration for a single tool run.
///
/// Built once per invocation from the caller's options; the harness and the
/// tool module only ever read it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Explicit path to the tool binary, overriding PATH resolution.
    pub binary: Option<PathBuf>,
    /// Directory the tool writes its per-target output under.
    pub output_path: PathBuf,
    /// Number of worker slots running tasks concurrently.
    pub threads: usize,
    /// Per-task timeout in seconds.
    pub timeout_secs: u64,
    /// Free-form extra arguments appended to the tool command line.
    pub extra_args: Option<String>,
    /// Skip execution and hand the enumerated targets straight to processing.
    pub dry_run: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            binary: None,
            output_path: PathBuf::new(),
            threads: DEFAULT_THREADS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            extra_args: None,
            dry_run: false,
        }
    }
}

impl RunConfig {
    /// Creates a configuration with the given output path and defaults for
    /// everything else.
    pub fn new<P: Into<PathBuf>>(output_path: P) -> Self {
        Self {
            output_path: output_path.into(),
            ..Self::default()
        }
    }

    /// Sets an explicit binary path, skipping PATH resolution.
    #[must_use]
    pub fn with_binary<P: Into<PathBuf>>(mut self, binary: P) -> Self {
        self.binary = Some(binary.into());
        self
    }

    /// Sets the worker-pool size.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Sets the per-task timeout in seconds.
    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Sets free-form extra arguments appended to the tool command line.
    #[must_use]
    pub fn with_extra_args<S: Into<String>>(mut self, extra_args: S) -> Self {
        self.extra_args = Some(extra_args.into());
        self
    }

    /// Enables or disables dry-run mode.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// The per-task timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
