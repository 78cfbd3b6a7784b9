//! Python dependency installation.
//!
//! Installs into the acquired venv, in a fixed order: pip is upgraded
//! first, numpy is installed ahead of the manifest because several Loki
//! dependencies need it present at build time, then the full requirements
//! file, then the project itself in editable mode.

use crate::error::Result;
use crate::shell::{execute_check, CommandOptions};

use super::venv::shquote;
use super::{InstallContext, Stage};

/// Stage 3: install pip, numpy, requirements, and the editable project.
pub struct PythonDependencies;

impl Stage for PythonDependencies {
    fn name(&self) -> &'static str {
        "python-deps"
    }

    fn run(&self, ctx: &mut InstallContext) -> Result<()> {
        let pip = shquote(&ctx.venv()?.pip().display().to_string());
        let project = shquote(&ctx.config.project_root.display().to_string());
        let capture = !ctx.out.mode().shows_command_output();
        let options = CommandOptions {
            cwd: Some(ctx.config.project_root.clone()),
            capture_stdout: capture,
            capture_stderr: capture,
        };

        for (label, command) in [
            ("Upgrading pip", format!("{pip} install --upgrade pip")),
            ("Installing numpy", format!("{pip} install numpy")),
            (
                "Installing requirements",
                format!("{pip} install -r requirements.txt"),
            ),
            (
                "Installing Loki (editable)",
                format!("{pip} install -e {project}"),
            ),
        ] {
            ctx.out.status(label);
            execute_check(&command, &ctx.shell, &options)?;
        }
        Ok(())
    }
}
