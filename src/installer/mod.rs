//! Environment provisioning pipeline.
//!
//! The installer is a strictly sequential, non-resumable pipeline. Each
//! stage is gated by configuration flags, and any stage failure aborts the
//! whole run with no retry and no cleanup of partially created state.
//! Interrupting a run leaves a partial environment; recovery is a fresh
//! run from scratch.
//!
//! Stage order:
//!
//! 1. ECMWF workstation modules (`--ecmwf`)
//! 2. Virtual environment acquisition
//! 3. Python dependency installation
//! 4. JDK (`--with-jdk`)
//! 5. Apache Ant (`--with-ant`)
//! 6. CLAW/OMNI compiler (`--with-claw`)
//! 7. Open Fortran Parser patching
//! 8. Activation script generation

pub mod activate;
pub mod ant;
pub mod claw;
pub mod config;
pub mod jdk;
pub mod manifest;
pub mod modules;
pub mod ofp;
pub mod pins;
pub mod python_deps;
pub mod venv;

pub use config::{InstallConfig, Venv};

use crate::error::{Result, SetupError};
use crate::shell::ShellContext;
use crate::ui::Output;
use std::path::PathBuf;

/// Mutable state threaded through the pipeline.
///
/// Stages communicate through this context instead of mutating the process
/// environment: shell exports accumulate in [`ShellContext`], installed
/// component locations are recorded here, and the activation stage
/// serializes the result.
pub struct InstallContext {
    /// Immutable run configuration.
    pub config: InstallConfig,

    /// Accumulated environment for spawned commands.
    pub shell: ShellContext,

    /// Terminal output.
    pub out: Output,

    venv: Option<Venv>,

    /// `JAVA_HOME` of the self-installed JDK, when stage 4 ran.
    pub jdk_home: Option<PathBuf>,

    /// Ant install root, when stage 5 ran.
    pub ant_home: Option<PathBuf>,

    /// CLAW install root, when stage 6 ran.
    pub claw_home: Option<PathBuf>,

    /// Jar paths composed into `CLASSPATH` by the activation script.
    pub classpath: Vec<PathBuf>,

    /// Python version reported by the venv interpreter (e.g. "3.8.8").
    pub python_version: Option<String>,
}

impl InstallContext {
    /// Create a fresh context for a run.
    pub fn new(config: InstallConfig, out: Output) -> Self {
        Self {
            config,
            shell: ShellContext::new(),
            out,
            venv: None,
            jdk_home: None,
            ant_home: None,
            claw_home: None,
            classpath: Vec::new(),
            python_version: None,
        }
    }

    /// Record the acquired virtual environment.
    pub fn set_venv(&mut self, venv: Venv) {
        self.venv = Some(venv);
    }

    /// The acquired virtual environment.
    ///
    /// Stage ordering guarantees acquisition before use; a miss here is a
    /// pipeline bug, reported as a stage failure rather than a panic.
    pub fn venv(&self) -> Result<&Venv> {
        self.venv.as_ref().ok_or_else(|| SetupError::StageFailed {
            stage: "venv".into(),
            message: "virtual environment not acquired yet".into(),
        })
    }

    /// Whether a venv has been recorded.
    pub fn has_venv(&self) -> bool {
        self.venv.is_some()
    }
}

/// One provisioning stage.
pub trait Stage {
    /// Short stage name used in progress output and errors.
    fn name(&self) -> &'static str;

    /// Whether the configuration enables this stage.
    fn enabled(&self, config: &InstallConfig) -> bool {
        let _ = config;
        true
    }

    /// Execute the stage. Errors abort the pipeline.
    fn run(&self, ctx: &mut InstallContext) -> Result<()>;
}

/// The full stage list in execution order.
pub fn stages() -> Vec<Box<dyn Stage>> {
    vec![
        Box::new(modules::EcmwfModules),
        Box::new(venv::VenvAcquisition),
        Box::new(python_deps::PythonDependencies),
        Box::new(jdk::JdkInstall),
        Box::new(ant::AntInstall),
        Box::new(claw::ClawInstall),
        Box::new(ofp::OfpPatch),
        Box::new(activate::ActivationScript),
    ]
}

/// Run the pipeline for the given configuration.
///
/// With `dry_run` set, prints the enabled stage plan and exits without
/// touching the filesystem.
pub fn run(config: InstallConfig, out: Output) -> Result<()> {
    let all = stages();
    let enabled: Vec<&dyn Stage> = all
        .iter()
        .filter(|s| s.enabled(&config))
        .map(|s| s.as_ref())
        .collect();
    let total = enabled.len();

    if config.dry_run {
        out.status("Planned stages (dry run):");
        for (index, stage) in enabled.iter().enumerate() {
            out.stage(index + 1, total, stage.name());
        }
        return Ok(());
    }

    let mut ctx = InstallContext::new(config, out);
    for (index, stage) in enabled.iter().enumerate() {
        ctx.out.stage(index + 1, total, stage.name());
        tracing::info!(stage = stage.name(), "running stage");
        stage.run(&mut ctx).map_err(|err| match err {
            // Stage-tagged errors pass through; raw command failures get
            // attributed to the stage that issued them.
            SetupError::StageFailed { .. } => err,
            other => SetupError::StageFailed {
                stage: stage.name().to_string(),
                message: other.to_string(),
            },
        })?;
    }

    manifest::write(&ctx)?;
    ctx.out.success(&format!(
        "Environment ready. Activate with: source {}",
        ctx.config.activate_script().display()
    ));
    Ok(())
}
