use std::path::PathBuf;

use quiver_core::{Result, RunConfig, Target, Task, TaskOutcome, TaskReport, ToolModule};
use tracing::{debug, info};

use crate::executor::ExecutorPool;
use crate::resolver::resolve_binary;
use crate::template::CommandTemplate;

/// Summary of one tool run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RunReport {
    /// Resolved path of the tool binary.
    pub binary: PathBuf,
    /// The enumerated target list, exactly as handed to output processing.
    pub targets: Vec<Target>,
    /// Per-task reports in target order; empty for a dry run.
    pub tasks: Vec<TaskReport>,
}

impl RunReport {
    /// Number of tasks that hit their timeout.
    #[must_use]
    pub fn timed_out(&self) -> usize {
        self.tasks
            .iter()
            .filter(|task| task.outcome.is_timeout())
            .count()
    }

    /// Number of tasks whose process never started or could not be waited
    /// on.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.tasks
            .iter()
            .filter(|task| matches!(task.outcome, TaskOutcome::Failed { .. }))
            .count()
    }
}

/// Drives one run of a tool module end to end: resolve the binary,
/// enumerate targets, dispatch one command per target through the executor
/// pool, then hand the target list to the module's output processing.
pub struct ToolRunner {
    config: RunConfig,
}

impl ToolRunner {
    /// Creates a runner for one immutable run configuration.
    #[must_use]
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Read access to the run configuration.
    #[must_use]
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Runs `module` end to end.
    ///
    /// Binary resolution, enumeration, and templating failures abort before
    /// anything is dispatched and the module's
    /// [`process`](ToolModule::process) is not invoked. Per-task timeouts
    /// and process failures are recorded in the report and are never fatal:
    /// `process` receives the full enumerated target list exactly once,
    /// after every task has reached a terminal outcome. In dry-run mode
    /// templating and execution are skipped entirely but `process` still
    /// runs.
    ///
    /// # Errors
    ///
    /// Returns an error for resolution, enumeration, or templating
    /// failures, or when output processing itself fails.
    pub async fn run(&self, module: &dyn ToolModule) -> Result<RunReport> {
        let binary = resolve_binary(self.config.binary.as_deref(), module.binary_name())?;
        debug!(
            module = module.name(),
            binary = %binary.display(),
            "resolved tool binary"
        );

        let targets = module.enumerate(&self.config).await?;
        info!(
            module = module.name(),
            targets = targets.len(),
            dry_run = self.config.dry_run,
            "starting run"
        );

        let tasks = if self.config.dry_run {
            Vec::new()
        } else {
            self.dispatch(module, &binary, &targets).await?
        };

        module.process(&self.config, &targets).await?;
        info!(module = module.name(), "run complete");

        Ok(RunReport {
            binary,
            targets,
            tasks,
        })
    }

    /// Templates one task per target and joins the whole batch.
    async fn dispatch(
        &self,
        module: &dyn ToolModule,
        binary: &std::path::Path,
        targets: &[Target],
    ) -> Result<Vec<TaskReport>> {
        let template = CommandTemplate::parse(&module.build_command(&self.config, binary)?)?;
        let timeout = self.config.timeout();
        let tasks: Vec<Task> = targets
            .iter()
            .map(|target| Task::new(template.render(target), timeout))
            .collect();

        Ok(ExecutorPool::new(self.config.threads).run(tasks).await)
    }
}
