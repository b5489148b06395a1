//! quiver CLI - run an external tool across a target list and process the
//! output it produced.

use anyhow::Result;
use clap::Parser as _;
use quiver_core::RunConfig;
use quiver_harness::{RunReport, ToolRunner};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
mod module;

use cli::Cli;
use module::FileListModule;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = RunConfig::new(&cli.output_path)
        .with_threads(cli.threads)
        .with_timeout_secs(cli.timeout)
        .with_dry_run(cli.no_binary);
    if let Some(binary) = &cli.binary {
        config = config.with_binary(binary);
    }
    if let Some(extra_args) = &cli.extra_args {
        config = config.with_extra_args(extra_args.clone());
    }

    let module = FileListModule::new(
        cli.tool.clone().unwrap_or_default(),
        &cli.targets_file,
        cli.template.clone(),
    );

    let report = ToolRunner::new(config).run(&module).await?;

    info!(
        targets = report.targets.len(),
        timed_out = report.timed_out(),
        failed = report.failed(),
        "run finished"
    );

    if let Some(path) = &cli.report {
        write_report(path, &report).await?;
    }

    Ok(())
}

/// Writes the JSON run report next to the tool's own output.
async fn write_report(path: &std::path::Path, report: &RunReport) -> Result<()> {
    let json = serde_json::to_vec_pretty(report)?;
    tokio::fs::write(path, json).await?;
    info!(report = %path.display(), "wrote run report");
    Ok(())
}
