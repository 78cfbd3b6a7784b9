//! ECMWF workstation module loading.
//!
//! ECMWF workstations provide toolchains through environment modules. The
//! `module` command is a shell function, so the loads are recorded as a
//! prelude on the shell context and replayed both by every subsequent
//! pipeline command and by the activation script.

use crate::error::Result;

use super::{pins, InstallConfig, InstallContext, Stage};

/// Stage 1: record pinned module loads and the proxy export.
pub struct EcmwfModules;

impl Stage for EcmwfModules {
    fn name(&self) -> &'static str {
        "ecmwf-modules"
    }

    fn enabled(&self, config: &InstallConfig) -> bool {
        config.ecmwf
    }

    fn run(&self, ctx: &mut InstallContext) -> Result<()> {
        for module in module_loads(&ctx.config) {
            ctx.out.status(&format!("module load {module}"));
            ctx.shell.push_prelude(format!("module load {module}"));
        }
        ctx.shell.export(pins::ECMWF_PROXY_VAR, pins::ECMWF_PROXY);
        Ok(())
    }
}

/// Modules to load, in order: the fixed toolchain set, plus the Maxeler
/// toolchain when the experimental simulator is requested.
pub fn module_loads(config: &InstallConfig) -> Vec<&'static str> {
    let mut modules: Vec<&'static str> = pins::ECMWF_MODULES.to_vec();
    if config.with_max {
        modules.extend_from_slice(pins::MAXELER_MODULES);
    }
    modules
}
