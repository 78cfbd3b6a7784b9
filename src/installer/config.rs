//! Installer configuration.
//!
//! Parsed once from the command line, validated before any side effect,
//! and immutable for the rest of the run.

use crate::error::{Result, SetupError};
use std::path::{Path, PathBuf};

use super::pins;

/// Immutable configuration for one provisioning run.
#[derive(Debug, Clone)]
pub struct InstallConfig {
    /// Project root the environment is provisioned for.
    pub project_root: PathBuf,

    /// ECMWF workstation mode: load fixed toolchain modules and the proxy.
    pub ecmwf: bool,

    /// Caller-supplied virtual environment to reuse instead of creating one.
    pub use_venv: Option<PathBuf>,

    /// Install a pinned JDK into the venv's private opt area.
    pub with_jdk: bool,

    /// Install Apache Ant into the venv's private opt area.
    pub with_ant: bool,

    /// Clone and build the CLAW/OMNI compiler.
    pub with_claw: bool,

    /// Enable the experimental Maxeler simulator toolchain.
    pub with_max: bool,

    /// Print the stage plan without executing anything.
    pub dry_run: bool,
}

impl InstallConfig {
    /// Build and validate a configuration.
    ///
    /// The one cross-field rule is enforced here, before any side effect:
    /// the Maxeler toolchain only exists on ECMWF workstations, so
    /// `with_max` requires `ecmwf`.
    pub fn new(
        project_root: PathBuf,
        ecmwf: bool,
        use_venv: Option<PathBuf>,
        with_jdk: bool,
        with_ant: bool,
        with_claw: bool,
        with_max: bool,
        dry_run: bool,
    ) -> Result<Self> {
        if with_max && !ecmwf {
            return Err(SetupError::InvalidOptions {
                message: "--with-max requires --ecmwf".into(),
            });
        }

        Ok(Self {
            project_root,
            ecmwf,
            use_venv,
            with_jdk,
            with_ant,
            with_claw,
            with_max,
            dry_run,
        })
    }

    /// The virtual environment root this run targets.
    pub fn venv_root(&self) -> PathBuf {
        self.use_venv
            .clone()
            .unwrap_or_else(|| self.project_root.join(pins::DEFAULT_VENV_DIR))
    }

    /// Path of the generated activation script.
    pub fn activate_script(&self) -> PathBuf {
        self.project_root.join(pins::ACTIVATE_SCRIPT)
    }
}

/// Paths inside a virtual environment.
#[derive(Debug, Clone)]
pub struct Venv {
    root: PathBuf,
}

impl Venv {
    /// Wrap an existing or to-be-created venv root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The venv root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The venv `bin` directory.
    pub fn bin(&self) -> PathBuf {
        self.root.join("bin")
    }

    /// The venv's python interpreter.
    pub fn python(&self) -> PathBuf {
        self.bin().join("python")
    }

    /// The venv's pip.
    pub fn pip(&self) -> PathBuf {
        self.bin().join("pip")
    }

    /// Private area for self-installed third-party components.
    pub fn opt(&self) -> PathBuf {
        self.root.join("opt")
    }

    /// Download scratch area inside the private opt area.
    pub fn downloads(&self) -> PathBuf {
        self.opt().join("downloads")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(ecmwf: bool, with_max: bool) -> Result<InstallConfig> {
        InstallConfig::new(
            PathBuf::from("/proj"),
            ecmwf,
            None,
            false,
            false,
            false,
            with_max,
            false,
        )
    }

    #[test]
    fn with_max_requires_ecmwf() {
        let err = config(false, true).unwrap_err();
        assert!(matches!(err, SetupError::InvalidOptions { .. }));
        assert!(err.to_string().contains("--with-max requires --ecmwf"));
    }

    #[test]
    fn with_max_accepted_under_ecmwf() {
        assert!(config(true, true).is_ok());
    }

    #[test]
    fn venv_root_defaults_to_project_relative_loki_env() {
        let cfg = config(false, false).unwrap();
        assert_eq!(cfg.venv_root(), PathBuf::from("/proj/loki_env"));
    }

    #[test]
    fn caller_supplied_venv_wins() {
        let cfg = InstallConfig::new(
            PathBuf::from("/proj"),
            false,
            Some(PathBuf::from("/existing/env")),
            false,
            false,
            false,
            false,
            false,
        )
        .unwrap();
        assert_eq!(cfg.venv_root(), PathBuf::from("/existing/env"));
    }

    #[test]
    fn venv_layout_paths() {
        let venv = Venv::new("/v");
        assert_eq!(venv.bin(), PathBuf::from("/v/bin"));
        assert_eq!(venv.python(), PathBuf::from("/v/bin/python"));
        assert_eq!(venv.opt(), PathBuf::from("/v/opt"));
        assert_eq!(venv.downloads(), PathBuf::from("/v/opt/downloads"));
    }
}
