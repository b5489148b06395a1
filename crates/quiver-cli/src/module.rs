//! Generic tool module driven by a file of targets and a user-supplied
//! command template.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use quiver_core::{Error, Result, RunConfig, Target, ToolModule};
use tokio::fs;
use tracing::{info, warn};

/// Module name, used in logs and as the default output directory.
pub const MODULE_NAME: &str = "filelist";

/// Tool module that enumerates targets from a line-per-target file and
/// templates the command line from a user-supplied template string.
///
/// Output processing checks which per-target output files the tool actually
/// produced; parsing their contents is left to the tool's consumers.
pub struct FileListModule {
    tool: String,
    targets_file: PathBuf,
    template: String,
}

impl FileListModule {
    /// Creates a module for the given binary name, targets file, and
    /// command template.
    pub fn new<S: Into<String>, P: Into<PathBuf>, T: Into<String>>(
        tool: S,
        targets_file: P,
        template: T,
    ) -> Self {
        Self {
            tool: tool.into(),
            targets_file: targets_file.into(),
            template: template.into(),
        }
    }
}

/// Maps a target identifier to a filesystem-safe output file name.
fn output_name(ident: &str) -> String {
    let sanitized: String = ident
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') {
                ch
            } else {
                '_'
            }
        })
        .collect();
    format!("{sanitized}.out")
}

#[async_trait]
impl ToolModule for FileListModule {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    fn binary_name(&self) -> &str {
        &self.tool
    }

    async fn enumerate(&self, config: &RunConfig) -> Result<Vec<Target>> {
        let contents = fs::read_to_string(&self.targets_file).await.map_err(|err| {
            Error::Enumeration(format!(
                "cannot read targets file {}: {err}",
                self.targets_file.display()
            ))
        })?;

        fs::create_dir_all(&config.output_path).await?;

        let targets: Vec<Target> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| Target::new(line, config.output_path.join(output_name(line))))
            .collect();

        Ok(targets)
    }

    fn build_command(&self, config: &RunConfig, binary: &Path) -> Result<String> {
        let mut command = format!("{} {}", binary.display(), self.template);
        if let Some(extra_args) = &config.extra_args {
            command.push(' ');
            command.push_str(extra_args);
        }
        Ok(command)
    }

    async fn process(&self, _config: &RunConfig, targets: &[Target]) -> Result<()> {
        let mut missing = 0_usize;
        for target in targets {
            if fs::try_exists(&target.output).await.unwrap_or(false) {
                info!(ident = %target.ident, output = %target.output.display(), "output ready");
            } else {
                missing += 1;
                warn!(ident = %target.ident, output = %target.output.display(), "no output produced");
            }
        }

        info!(
            targets = targets.len(),
            with_output = targets.len() - missing,
            missing,
            "processed run output"
        );
        Ok(())
    }
}
