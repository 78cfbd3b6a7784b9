//! The default provisioning command.

use std::path::Path;

use crate::cli::args::Cli;
use crate::error::Result;
use crate::installer::{self, InstallConfig};
use crate::ui::Output;

use super::{Command, CommandResult};

/// Runs the provisioning pipeline from the top-level CLI flags.
pub struct InstallCommand {
    project_root: std::path::PathBuf,
    ecmwf: bool,
    use_venv: Option<std::path::PathBuf>,
    with_jdk: bool,
    with_ant: bool,
    with_claw: bool,
    with_max: bool,
    dry_run: bool,
}

impl InstallCommand {
    /// Build the command from parsed CLI flags.
    pub fn from_cli(project_root: &Path, cli: &Cli) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            ecmwf: cli.ecmwf,
            use_venv: cli.use_venv.clone(),
            with_jdk: cli.with_jdk,
            with_ant: cli.with_ant,
            with_claw: cli.with_claw,
            with_max: cli.with_max,
            dry_run: cli.dry_run,
        }
    }

    fn config(&self) -> Result<InstallConfig> {
        InstallConfig::new(
            self.project_root.clone(),
            self.ecmwf,
            self.use_venv.clone(),
            self.with_jdk,
            self.with_ant,
            self.with_claw,
            self.with_max,
            self.dry_run,
        )
    }
}

impl Command for InstallCommand {
    fn execute(&self, out: &Output) -> Result<CommandResult> {
        // Validation happens here, before any side effect; an invalid flag
        // combination never reaches the pipeline.
        let config = self.config()?;
        installer::run(config, *out)?;
        Ok(CommandResult::success())
    }
}
