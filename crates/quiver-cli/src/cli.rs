//! Command-line surface for the generic file-list module.

use clap::Parser;
use std::path::PathBuf;

/// Runs an external tool across a list of targets with bounded parallelism
/// and a per-task timeout, then processes the produced output.
#[derive(Debug, Parser)]
#[command(name = "quiver", version, about)]
pub struct Cli {
    /// Name of the tool binary to resolve from PATH.
    #[arg(long, required_unless_present = "binary")]
    pub tool: Option<String>,

    /// Explicit path to the tool binary, skipping PATH resolution.
    #[arg(short, long)]
    pub binary: Option<PathBuf>,

    /// File with one target per line; blank lines and `#` comments are
    /// skipped.
    #[arg(long)]
    pub targets_file: PathBuf,

    /// Command template appended after the binary; `{target}` and
    /// `{output}` are substituted per target.
    #[arg(long)]
    pub template: String,

    /// Directory to store per-target output under; defaults to the module
    /// name.
    #[arg(short, long, default_value = crate::module::MODULE_NAME)]
    pub output_path: PathBuf,

    /// Number of tasks to run concurrently.
    #[arg(long, default_value_t = quiver_core::DEFAULT_THREADS)]
    pub threads: usize,

    /// Per-task timeout in seconds.
    #[arg(long, default_value_t = quiver_core::DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Additional arguments appended to the tool command line.
    #[arg(long)]
    pub extra_args: Option<String>,

    /// Skip running the binary and only process existing output. Useful
    /// when the tool already ran.
    #[arg(long)]
    pub no_binary: bool,

    /// Write a JSON run report (targets and per-task outcomes) to this
    /// path.
    #[arg(long)]
    pub report: Option<PathBuf>,
}
