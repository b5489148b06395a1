use async_trait::async_trait;
use std::path::Path;

use crate::{Result, RunConfig, Target};

/// Capability set a concrete tool integration must supply.
///
/// The harness depends only on this trait: how targets are enumerated, how
/// the command line is templated, and how produced output is ingested are
/// the module's business. The same target list handed back by
/// [`enumerate`](Self::enumerate) is later passed to
/// [`process`](Self::process), untouched.
#[async_trait]
pub trait ToolModule: Send + Sync {
    /// Human-readable module name, used in logs.
    fn name(&self) -> &'static str;

    /// Name of the binary to resolve when no explicit path is configured.
    fn binary_name(&self) -> &str;

    /// Produces the ordered (target, output) list for this run.
    ///
    /// # Errors
    ///
    /// Enumeration failures are fatal to the run; no task is dispatched and
    /// [`process`](Self::process) is not invoked.
    async fn enumerate(&self, config: &RunConfig) -> Result<Vec<Target>>;

    /// Produces the command template for this run, containing the literal
    /// placeholders `{target}` and `{output}`.
    ///
    /// `binary` is the resolved absolute path of the tool and is expected to
    /// lead the template.
    ///
    /// # Errors
    ///
    /// Template construction failures are fatal to the run.
    fn build_command(&self, config: &RunConfig, binary: &Path) -> Result<String>;

    /// Consumes the full target list after execution, or after a skipped
    /// dry run. Invoked exactly once per run that got past binary
    /// resolution and enumeration, regardless of per-task outcomes.
    ///
    /// # Errors
    ///
    /// Returns an error if result ingestion fails.
    async fn process(&self, config: &RunConfig, targets: &[Target]) -> Result<()>;
}
