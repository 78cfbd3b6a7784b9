//! Activation script generation.
//!
//! The last stage serializes the accumulated environment into a shell
//! fragment at the project root. Sourcing it re-enters the venv and
//! reconstructs `PATH`/`CLASSPATH` for every component that was installed,
//! in fixed precedence order: Maxeler simulator tools first, then CLAW,
//! then the self-installed JDK, all ahead of the inherited `PATH`.

use crate::error::Result;
use std::fs;

use super::{pins, InstallContext, Stage};

/// Stage 8: write the `loki-activate` script.
pub struct ActivationScript;

impl Stage for ActivationScript {
    fn name(&self) -> &'static str {
        "activate"
    }

    fn run(&self, ctx: &mut InstallContext) -> Result<()> {
        let script = compose(ctx)?;
        let path = ctx.config.activate_script();
        fs::write(&path, script)?;
        ctx.out
            .status(&format!("Wrote activation script to {}", path.display()));
        Ok(())
    }
}

/// Compose the activation script for the current context.
pub fn compose(ctx: &InstallContext) -> Result<String> {
    let venv = ctx.venv()?;
    let mut lines = vec![
        "#!/usr/bin/env bash".to_string(),
        format!(
            "# Generated by loki-setup {} on {}",
            env!("CARGO_PKG_VERSION"),
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        ),
        String::new(),
    ];

    if ctx.config.ecmwf {
        for module in super::modules::module_loads(&ctx.config) {
            lines.push(format!("module load {module}"));
        }
        lines.push(format!(
            "export {}=\"{}\"",
            pins::ECMWF_PROXY_VAR,
            pins::ECMWF_PROXY
        ));
        lines.push(String::new());
    }

    lines.push(format!(
        "source \"{}/activate\"",
        venv.bin().display()
    ));

    if let Some(jdk_home) = &ctx.jdk_home {
        lines.push(format!("export JAVA_HOME=\"{}\"", jdk_home.display()));
    }
    if let Some(ant_home) = &ctx.ant_home {
        lines.push(format!("export ANT_HOME=\"{}\"", ant_home.display()));
    }

    // PATH precedence: Maxeler simulator tools, then CLAW, then the JDK,
    // then Ant, ahead of whatever the caller's shell inherited.
    let mut path_entries: Vec<String> = Vec::new();
    if ctx.config.with_max {
        path_entries.push("${MAXCOMPILERDIR}/bin".to_string());
    }
    if let Some(claw_home) = &ctx.claw_home {
        path_entries.push(format!("{}/bin", claw_home.display()));
    }
    if ctx.jdk_home.is_some() {
        path_entries.push("${JAVA_HOME}/bin".to_string());
    }
    if ctx.ant_home.is_some() {
        path_entries.push("${ANT_HOME}/bin".to_string());
    }
    if !path_entries.is_empty() {
        lines.push(format!(
            "export PATH=\"{}:${{PATH}}\"",
            path_entries.join(":")
        ));
    }

    if !ctx.classpath.is_empty() {
        let jars: Vec<String> = ctx
            .classpath
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        lines.push(format!(
            "export CLASSPATH=\"{}:${{CLASSPATH:-}}\"",
            jars.join(":")
        ));
    }

    lines.push(String::new());
    Ok(lines.join("\n"))
}
