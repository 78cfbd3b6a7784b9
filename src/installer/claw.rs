//! Optional CLAW/OMNI compiler installation.
//!
//! Clones the pinned claw-compiler repository recursively (the OMNI
//! compiler is a submodule), configures an out-of-tree build, and installs
//! into the venv's private `opt` area. Requires a JDK and Ant, either
//! self-installed by the earlier stages or provided by the system.

use crate::error::Result;
use crate::shell::{execute_check, CommandOptions};
use std::fs;

use super::venv::shquote;
use super::{pins, InstallConfig, InstallContext, Stage};

/// Stage 6: CLAW/OMNI compiler.
pub struct ClawInstall;

impl Stage for ClawInstall {
    fn name(&self) -> &'static str {
        "claw"
    }

    fn enabled(&self, config: &InstallConfig) -> bool {
        config.with_claw
    }

    fn run(&self, ctx: &mut InstallContext) -> Result<()> {
        let venv = ctx.venv()?.clone();
        let capture = !ctx.out.mode().shows_command_output();
        let src = venv.downloads().join("claw-compiler");
        let build = src.join("build");
        let prefix = venv.opt().join("claw");

        if !src.is_dir() {
            ctx.out.status("Cloning claw-compiler");
            fs::create_dir_all(venv.downloads())?;
            execute_check(
                &format!(
                    "git clone --recursive --branch {} {} {}",
                    pins::CLAW_TAG,
                    pins::CLAW_REPO,
                    shquote(&src.display().to_string())
                ),
                &ctx.shell,
                &CommandOptions {
                    cwd: Some(venv.downloads()),
                    capture_stdout: capture,
                    capture_stderr: capture,
                },
            )?;
        }

        fs::create_dir_all(&build)?;
        let options = CommandOptions {
            cwd: Some(build.clone()),
            capture_stdout: capture,
            capture_stderr: capture,
        };

        ctx.out.status("Configuring CLAW");
        execute_check(
            &format!(
                "cmake -DCMAKE_INSTALL_PREFIX={} ..",
                shquote(&prefix.display().to_string())
            ),
            &ctx.shell,
            &options,
        )?;

        ctx.out.status("Building CLAW");
        execute_check("make", &ctx.shell, &options)?;

        ctx.out.status("Installing CLAW");
        execute_check("make install", &ctx.shell, &options)?;

        ctx.shell.prepend_path(&prefix.join("bin"));
        ctx.claw_home = Some(prefix);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn disabled_without_flag() {
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
        assert!(!ClawInstall.enabled(&cfg));
    }

    #[test]
    fn clone_is_pinned_to_a_tag() {
        assert!(pins::CLAW_TAG.starts_with('v'));
        assert!(pins::CLAW_REPO.ends_with(".git"));
    }
}
