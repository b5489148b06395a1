use std::process::Stdio;
use std::sync::Arc;
use std::time::Instant;

use quiver_core::{Task, TaskOutcome, TaskReport};
use tokio::process::Command;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{debug, error, warn};

/// Fixed-size worker pool running tasks as independent OS processes.
///
/// The whole batch is submitted at once and joined as a unit: each task
/// occupies one worker slot from process start until it exits or is timed
/// out, and a slot admits the next queued task as soon as it drains. A
/// single hung or failed process never stalls the rest of the batch.
pub struct ExecutorPool {
    max_workers: usize,
}

impl ExecutorPool {
    /// Creates a pool with `max_workers` slots; zero is clamped to one.
    #[must_use]
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers: max_workers.max(1),
        }
    }

    /// Runs every task to a terminal outcome and returns one report per
    /// task, in input order.
    ///
    /// At most `max_workers` processes run concurrently; admission follows
    /// input order, completion order is unspecified. Timeouts and spawn
    /// failures are recorded in the corresponding report and never abort
    /// the batch.
    pub async fn run(&self, tasks: Vec<Task>) -> Vec<TaskReport> {
        let task_count = tasks.len();
        let semaphore = Arc::new(Semaphore::new(self.max_workers));
        let mut join_set = JoinSet::new();

        for (index, task) in tasks.into_iter().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            join_set.spawn(async move {
                let report = match semaphore.acquire_owned().await {
                    Ok(_permit) => execute_task(task).await,
                    // The semaphore is never closed while the batch runs.
                    Err(err) => TaskReport {
                        args: task.args,
                        outcome: TaskOutcome::Failed {
                            reason: format!("worker slot unavailable: {err}"),
                        },
                        duration: std::time::Duration::ZERO,
                    },
                };
                (index, report)
            });
        }

        let mut reports: Vec<Option<TaskReport>> = vec![None; task_count];
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, report)) => reports[index] = Some(report),
                Err(err) => error!("task join failed: {err}"),
            }
        }

        reports.into_iter().flatten().collect()
    }
}

/// Runs one task to a terminal outcome while its permit is held.
async fn execute_task(task: Task) -> TaskReport {
    let command_line = task.command_line();
    debug!(
        command = %command_line,
        timeout_secs = task.timeout.as_secs(),
        "executing command"
    );

    let start = Instant::now();
    let outcome = run_process(&task).await;
    let duration = start.elapsed();

    match &outcome {
        TaskOutcome::Completed { exit_code } => {
            debug!(command = %command_line, ?exit_code, "command finished");
        }
        TaskOutcome::TimedOut => {
            warn!(
                command = %command_line,
                timeout_secs = task.timeout.as_secs(),
                "timeout reached, aborting command"
            );
        }
        TaskOutcome::Failed { reason } => {
            warn!(command = %command_line, %reason, "command failed to run");
        }
    }

    TaskReport {
        args: task.args,
        outcome,
        duration,
    }
}

/// Spawns the process and waits on it up to the task's timeout.
///
/// On timeout the child is killed and reaped so it cannot outlive the
/// batch. Start failures are captured, never propagated.
async fn run_process(task: &Task) -> TaskOutcome {
    let Some((program, args)) = task.args.split_first() else {
        return TaskOutcome::Failed {
            reason: "empty argument vector".to_owned(),
        };
    };

    let mut command = Command::new(program);
    command.args(args).stdin(Stdio::null());

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(err) => {
            return TaskOutcome::Failed {
                reason: format!("spawn failed: {err}"),
            };
        }
    };

    match timeout(task.timeout, child.wait()).await {
        Ok(Ok(status)) => TaskOutcome::Completed {
            exit_code: status.code(),
        },
        Ok(Err(err)) => TaskOutcome::Failed {
            reason: format!("wait failed: {err}"),
        },
        Err(_elapsed) => {
            if let Err(err) = child.start_kill() {
                warn!("failed to kill timed-out process: {err}");
            }
            // Reap so the kernel can release the child.
            let _ = child.wait().await;
            TaskOutcome::TimedOut
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn shell_task(script: &str, timeout: Duration) -> Task {
        Task::new(
            vec!["sh".to_owned(), "-c".to_owned(), script.to_owned()],
            timeout,
        )
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let reports = ExecutorPool::new(4).run(Vec::new()).await;
        assert!(reports.is_empty());
    }

    #[tokio::test]
    async fn test_reports_follow_input_order() {
        let tasks = vec![
            shell_task("exit 0", Duration::from_secs(5)),
            shell_task("exit 3", Duration::from_secs(5)),
            shell_task("exit 0", Duration::from_secs(5)),
        ];
        let reports = ExecutorPool::new(2).run(tasks).await;

        assert_eq!(reports.len(), 3);
        assert_eq!(
            reports[0].outcome,
            TaskOutcome::Completed { exit_code: Some(0) }
        );
        assert_eq!(
            reports[1].outcome,
            TaskOutcome::Completed { exit_code: Some(3) }
        );
        assert_eq!(
            reports[2].outcome,
            TaskOutcome::Completed { exit_code: Some(0) }
        );
    }

    #[tokio::test]
    async fn test_spawn_failure_is_recorded_not_raised() {
        let tasks = vec![
            Task::new(
                vec!["/nonexistent/quiver-binary".to_owned()],
                Duration::from_secs(5),
            ),
            shell_task("exit 0", Duration::from_secs(5)),
        ];
        let reports = ExecutorPool::new(1).run(tasks).await;

        assert!(matches!(reports[0].outcome, TaskOutcome::Failed { .. }));
        assert!(reports[1].outcome.is_success());
    }

    #[tokio::test]
    async fn test_empty_argument_vector_fails() {
        let reports = ExecutorPool::new(1)
            .run(vec![Task::new(Vec::new(), Duration::from_secs(1))])
            .await;
        assert!(matches!(reports[0].outcome, TaskOutcome::Failed { .. }));
    }

    #[tokio::test]
    async fn test_timeout_does_not_block_batch() {
        let start = Instant::now();
        let tasks = vec![
            shell_task("sleep 30", Duration::from_secs(1)),
            shell_task("exit 0", Duration::from_secs(5)),
        ];
        let reports = ExecutorPool::new(1).run(tasks).await;

        assert!(reports[0].outcome.is_timeout());
        assert!(reports[1].outcome.is_success());
        // The 30s sleeper was killed at its 1s timeout, not waited out.
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_single_worker_serializes_tasks() {
        let start = Instant::now();
        let tasks = vec![
            shell_task("sleep 0.2", Duration::from_secs(5)),
            shell_task("sleep 0.2", Duration::from_secs(5)),
            shell_task("sleep 0.2", Duration::from_secs(5)),
        ];
        let reports = ExecutorPool::new(1).run(tasks).await;

        assert!(reports.iter().all(|report| report.outcome.is_success()));
        assert!(start.elapsed() >= Duration::from_millis(550));
    }

    #[tokio::test]
    async fn test_wide_pool_runs_tasks_concurrently() {
        let start = Instant::now();
        let tasks = (0..4)
            .map(|_| shell_task("sleep 0.3", Duration::from_secs(5)))
            .collect();
        let reports = ExecutorPool::new(4).run(tasks).await;

        assert_eq!(reports.len(), 4);
        assert!(reports.iter().all(|report| report.outcome.is_success()));
        // Serial execution would need 1.2s.
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_zero_workers_clamped_to_one() {
        let reports = ExecutorPool::new(0)
            .run(vec![shell_task("exit 0", Duration::from_secs(5))])
            .await;
        assert!(reports[0].outcome.is_success());
    }
}
