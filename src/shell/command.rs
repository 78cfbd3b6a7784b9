//! Shell command execution.

use crate::error::{Result, SetupError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Environment context threaded through provisioning stages.
///
/// Stages record exports here instead of mutating the process environment;
/// the context is applied to each spawned command and finally serialized
/// into the activation script.
#[derive(Debug, Clone, Default)]
pub struct ShellContext {
    /// Variables exported to every command run under this context.
    exports: BTreeMap<String, String>,

    /// Shell fragment prepended to every command (e.g. `module load` lines).
    prelude: Vec<String>,
}

impl ShellContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an environment export.
    pub fn export(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.exports.insert(key.into(), value.into());
    }

    /// Look up a previously recorded export.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.exports.get(key).map(String::as_str)
    }

    /// All recorded exports, in sorted order.
    pub fn exports(&self) -> impl Iterator<Item = (&str, &str)> {
        self.exports.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Prepend a directory to the `PATH` seen by subsequent commands.
    ///
    /// Starts from the recorded `PATH` export if one exists, falling back
    /// to the inherited process `PATH`.
    pub fn prepend_path(&mut self, dir: &Path) {
        let current = self
            .exports
            .get("PATH")
            .cloned()
            .or_else(|| std::env::var("PATH").ok())
            .unwrap_or_default();
        let value = if current.is_empty() {
            dir.display().to_string()
        } else {
            format!("{}:{}", dir.display(), current)
        };
        self.exports.insert("PATH".into(), value);
    }

    /// Append a prelude line run before every subsequent command.
    pub fn push_prelude(&mut self, line: impl Into<String>) {
        self.prelude.push(line.into());
    }

    /// The accumulated prelude lines.
    pub fn prelude(&self) -> &[String] {
        &self.prelude
    }

    /// Compose a command string with the prelude prepended.
    fn wrap(&self, command: &str) -> String {
        if self.prelude.is_empty() {
            command.to_string()
        } else {
            let mut script = self.prelude.join(" && ");
            script.push_str(" && ");
            script.push_str(command);
            script
        }
    }
}

/// Result of executing a shell command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output (empty unless captured).
    pub stdout: String,

    /// Standard error (empty unless captured).
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the command succeeded (exit code 0).
    pub success: bool,
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,
}

impl CommandOptions {
    /// Options that capture both output streams.
    pub fn captured() -> Self {
        Self {
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        }
    }

    /// Options that capture output and run in the given directory.
    pub fn captured_in(cwd: &Path) -> Self {
        Self {
            cwd: Some(cwd.to_path_buf()),
            capture_stdout: true,
            capture_stderr: true,
        }
    }
}

/// Execute a shell command under the given context.
///
/// The command string is passed to `sh -c` with the context's prelude
/// prepended and its exports applied. A non-zero exit is reported in the
/// returned [`CommandResult`], not as an `Err`; callers decide whether
/// failure is fatal.
pub fn execute(command: &str, ctx: &ShellContext, options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();
    let wrapped = ctx.wrap(command);

    tracing::debug!(command = %wrapped, "executing");

    let mut cmd = Command::new("sh");
    cmd.arg("-c");
    cmd.arg(&wrapped);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in ctx.exports() {
        cmd.env(key, value);
    }

    cmd.stdout(if options.capture_stdout {
        Stdio::piped()
    } else {
        Stdio::inherit()
    });
    cmd.stderr(if options.capture_stderr {
        Stdio::piped()
    } else {
        Stdio::inherit()
    });

    let output = cmd.output().map_err(|_| SetupError::CommandFailed {
        command: command.to_string(),
        code: None,
    })?;

    let duration = start.elapsed();

    let stdout = if options.capture_stdout {
        String::from_utf8_lossy(&output.stdout).to_string()
    } else {
        String::new()
    };
    let stderr = if options.capture_stderr {
        String::from_utf8_lossy(&output.stderr).to_string()
    } else {
        String::new()
    };

    Ok(CommandResult {
        exit_code: output.status.code(),
        stdout,
        stderr,
        duration,
        success: output.status.success(),
    })
}

/// Execute a command and fail if it exits non-zero.
///
/// This is the fail-fast entry point used by provisioning stages: any
/// failing command aborts the whole run, propagating the tool's exit
/// status, with no retry and no cleanup.
pub fn execute_check(command: &str, ctx: &ShellContext, options: &CommandOptions) -> Result<CommandResult> {
    let result = execute(command, ctx, options)?;
    if result.success {
        Ok(result)
    } else {
        if !result.stderr.is_empty() {
            tracing::debug!(stderr = %result.stderr.trim_end(), "command stderr");
        }
        Err(SetupError::CommandFailed {
            command: command.to_string(),
            code: result.exit_code,
        })
    }
}
