//! The `resolve` command.
//!
//! Registers the Loki tools (or an explicit list) as imported targets and
//! emits the registrations for the downstream build graph: human-readable,
//! JSON, or a CMake include fragment.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::args::{ResolveArgs, ResolveFormat};
use crate::error::{Result, SetupError};
use crate::installer::pins;
use crate::resolver::{cmake, ResolveMode, ToolRegistry, LOKI_TOOLS};
use crate::ui::Output;

use super::{Command, CommandResult};

/// Resolves tool targets and renders the registry.
pub struct ResolveCommand {
    project_root: PathBuf,
    args: ResolveArgs,
}

impl ResolveCommand {
    /// Create the command for the given project root.
    pub fn new(project_root: &Path, args: ResolveArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    /// Build the registry per the requested mode.
    pub fn build_registry(&self) -> ToolRegistry {
        let mode = if self.args.no_install {
            ResolveMode::system()
        } else {
            let venv_bin = self.args.venv_bin.clone().unwrap_or_else(|| {
                self.project_root.join(pins::DEFAULT_VENV_DIR).join("bin")
            });
            ResolveMode::Managed { venv_bin }
        };

        let mut registry = ToolRegistry::new();
        if self.args.tools.is_empty() {
            registry.register_tools(LOKI_TOOLS.iter().copied(), &mode);
        } else {
            registry.register_tools(self.args.tools.iter(), &mode);
        }
        registry.register_claw(&mode, self.args.with_claw);
        registry
    }

    fn render(&self, registry: &ToolRegistry) -> Result<String> {
        match self.args.format {
            ResolveFormat::Plain => {
                let mut lines = Vec::new();
                for target in registry.targets() {
                    let location = target
                        .location
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "<unresolved>".to_string());
                    let deps = if target.depends_on.is_empty() {
                        String::new()
                    } else {
                        format!(" (after {})", target.depends_on.join(", "))
                    };
                    lines.push(format!(
                        "{:<20} {:<12} {}{}",
                        target.name,
                        target.strategy.to_string(),
                        location,
                        deps
                    ));
                }
                lines.push(String::new());
                Ok(lines.join("\n"))
            }
            ResolveFormat::Json => {
                let targets: Vec<_> = registry.targets().collect();
                serde_json::to_string_pretty(&targets)
                    .map_err(|e| SetupError::Other(e.into()))
            }
            ResolveFormat::Cmake => Ok(cmake::render(registry)),
        }
    }
}

impl Command for ResolveCommand {
    fn execute(&self, out: &Output) -> Result<CommandResult> {
        let registry = self.build_registry();
        let rendered = self.render(&registry)?;

        match &self.args.output {
            Some(path) => {
                fs::write(path, rendered)?;
                out.status(&format!("Wrote {}", path.display()));
            }
            None => print!("{rendered}"),
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(no_install: bool, with_claw: bool) -> ResolveArgs {
        ResolveArgs {
            no_install,
            with_claw,
            ..Default::default()
        }
    }

    #[test]
    fn managed_mode_defaults_to_project_loki_env() {
        let cmd = ResolveCommand::new(Path::new("/proj"), args(false, false));
        let registry = cmd.build_registry();
        assert_eq!(
            registry.get("loki-transform.py").unwrap().location,
            Some(PathBuf::from("/proj/loki_env/bin/loki-transform.py"))
        );
    }

    #[test]
    fn default_tool_set_includes_claw_driver() {
        let cmd = ResolveCommand::new(Path::new("/proj"), args(false, true));
        let registry = cmd.build_registry();
        assert!(registry.get("loki-lint.py").is_some());
        assert!(registry.get("clawfc").is_some());
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn json_render_includes_strategy() {
        let cmd = ResolveCommand::new(
            Path::new("/proj"),
            ResolveArgs {
                format: ResolveFormat::Json,
                ..Default::default()
            },
        );
        let registry = cmd.build_registry();
        let json = cmd.render(&registry).unwrap();
        assert!(json.contains("\"strategy\": \"venv-bin\""));
    }

    #[test]
    fn plain_render_marks_unresolved_tools() {
        let cmd = ResolveCommand::new(
            Path::new("/proj"),
            ResolveArgs {
                tools: vec!["definitely-not-a-real-tool".into()],
                no_install: true,
                ..Default::default()
            },
        );
        let registry = cmd.build_registry();
        let plain = cmd.render(&registry).unwrap();
        assert!(plain.contains("<unresolved>"));
    }
}
