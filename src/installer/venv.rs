//! Virtual environment acquisition.
//!
//! Either reuses a caller-supplied venv (`--use-venv`) or creates a fresh
//! one at `<project_root>/loki_env`.

use crate::error::{Result, SetupError};
use crate::shell::{execute_check, CommandOptions};
use regex::Regex;

use super::{InstallContext, Stage, Venv};

/// Stage 2: acquire the virtual environment.
pub struct VenvAcquisition;

impl Stage for VenvAcquisition {
    fn name(&self) -> &'static str {
        "venv"
    }

    fn run(&self, ctx: &mut InstallContext) -> Result<()> {
        let root = ctx.config.venv_root();

        if let Some(supplied) = &ctx.config.use_venv {
            if !supplied.join("bin").is_dir() {
                return Err(SetupError::VenvNotFound {
                    path: supplied.clone(),
                });
            }
            ctx.out
                .status(&format!("Reusing virtual environment at {}", root.display()));
        } else if root.join("bin").is_dir() {
            // A leftover loki_env from an interrupted run is reused as-is;
            // a clean re-provision requires deleting it first.
            ctx.out
                .status(&format!("Found existing {}", root.display()));
        } else {
            ctx.out
                .status(&format!("Creating virtual environment at {}", root.display()));
            execute_check(
                &format!("python3 -m venv {}", shquote(&root.display().to_string())),
                &ctx.shell,
                &CommandOptions::captured(),
            )?;
        }

        let venv = Venv::new(&root);
        ctx.python_version = python_version(ctx, &venv)?;
        ctx.set_venv(venv);
        Ok(())
    }
}

/// Report the venv interpreter's version ("3.8.8"), if it can be parsed.
fn python_version(ctx: &InstallContext, venv: &Venv) -> Result<Option<String>> {
    let result = execute_check(
        &format!("{} --version", shquote(&venv.python().display().to_string())),
        &ctx.shell,
        &CommandOptions::captured(),
    )?;
    // "Python 3.8.8" arrives on stdout on modern interpreters, stderr on 2.x.
    let text = if result.stdout.trim().is_empty() {
        result.stderr
    } else {
        result.stdout
    };
    let re = Regex::new(r"Python (\d+\.\d+(?:\.\d+)?)").expect("static regex");
    Ok(re
        .captures(&text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string()))
}

/// Quote a path for inclusion in a `sh -c` command line.
pub(crate) fn shquote(s: &str) -> String {
    if s.chars()
        .all(|c| c.is_ascii_alphanumeric() || "/._-+=".contains(c))
    {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::installer::InstallConfig;
    use crate::ui::{Output, OutputMode};
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn supplied_venv_must_exist() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let cfg = InstallConfig::new(
            temp.path().to_path_buf(),
            false,
            Some(missing.clone()),
            false,
            false,
            false,
            false,
            false,
        )
        .unwrap();
        let mut ctx = InstallContext::new(cfg, Output::new(OutputMode::Quiet));

        let err = VenvAcquisition.run(&mut ctx).unwrap_err();
        match err {
            SetupError::VenvNotFound { path } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn shquote_passes_plain_paths_through() {
        assert_eq!(shquote("/a/b/loki_env"), "/a/b/loki_env");
    }

    #[test]
    fn shquote_quotes_spaces() {
        assert_eq!(shquote("/a b/env"), "'/a b/env'");
    }

    #[test]
    fn shquote_escapes_single_quotes() {
        assert_eq!(shquote("it's"), r"'it'\''s'");
    }

    #[test]
    fn default_venv_is_project_relative() {
        let cfg = InstallConfig::new(
            PathBuf::from("/proj"),
            false,
            None,
            false,
            false,
            false,
            false,
            false,
        )
        .unwrap();
        assert_eq!(cfg.venv_root(), PathBuf::from("/proj/loki_env"));
    }
}
