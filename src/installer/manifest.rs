//! Install manifest.
//!
//! A small JSON record written into the venv after a successful run, used
//! by later runs and by support requests to see what was provisioned and
//! when. Not a lockfile: the pipeline never reads it to skip work.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::InstallContext;

/// File name of the manifest inside the venv root.
pub const MANIFEST_FILE: &str = "loki-setup.json";

/// Record of one provisioning run.
#[derive(Debug, Serialize, Deserialize)]
pub struct InstallManifest {
    /// loki-setup version that wrote the manifest.
    pub setup_version: String,

    /// When the run completed.
    pub created: DateTime<Utc>,

    /// Venv interpreter version, if it could be determined.
    pub python_version: Option<String>,

    /// Whether ECMWF workstation modules were loaded.
    pub ecmwf: bool,

    /// Self-installed component locations.
    pub jdk_home: Option<PathBuf>,
    pub ant_home: Option<PathBuf>,
    pub claw_home: Option<PathBuf>,
}

impl InstallManifest {
    /// Build a manifest from a completed pipeline context.
    pub fn from_context(ctx: &InstallContext) -> Self {
        Self {
            setup_version: env!("CARGO_PKG_VERSION").to_string(),
            created: Utc::now(),
            python_version: ctx.python_version.clone(),
            ecmwf: ctx.config.ecmwf,
            jdk_home: ctx.jdk_home.clone(),
            ant_home: ctx.ant_home.clone(),
            claw_home: ctx.claw_home.clone(),
        }
    }

    /// Read a manifest from a venv root.
    pub fn read(venv_root: &Path) -> Result<Self> {
        let content = fs::read_to_string(venv_root.join(MANIFEST_FILE))?;
        serde_json::from_str(&content).map_err(|e| crate::error::SetupError::Other(e.into()))
    }
}

/// Write the manifest for a completed run.
pub fn write(ctx: &InstallContext) -> Result<()> {
    let manifest = InstallManifest::from_context(ctx);
    let path = ctx.venv()?.root().join(MANIFEST_FILE);
    let json = serde_json::to_string_pretty(&manifest)
        .map_err(|e| crate::error::SetupError::Other(e.into()))?;
    fs::write(&path, json)?;
    tracing::debug!(path = %path.display(), "wrote install manifest");
    Ok(())
}
