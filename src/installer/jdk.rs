//! Optional JDK installation.
//!
//! Downloads the pinned OpenJDK archive, extracts it into the venv's
//! private `opt` area, and exports `JAVA_HOME` for the rest of the run.

use crate::error::Result;
use crate::net::download::extract_tar_gz;
use crate::net::Downloader;

use super::{pins, InstallConfig, InstallContext, Stage};

/// Stage 4: self-installed JDK.
pub struct JdkInstall;

impl Stage for JdkInstall {
    fn name(&self) -> &'static str {
        "jdk"
    }

    fn enabled(&self, config: &InstallConfig) -> bool {
        config.with_jdk
    }

    fn run(&self, ctx: &mut InstallContext) -> Result<()> {
        let venv = ctx.venv()?.clone();
        let show_progress = ctx.out.mode().shows_status();

        let jdk_home = venv.opt().join(pins::JDK_DIR);
        if !jdk_home.is_dir() {
            let downloader = Downloader::new(&venv.downloads(), show_progress)?;
            let archive = downloader.fetch(pins::JDK_URL)?;
            ctx.out.status("Extracting JDK");
            extract_tar_gz(&archive, &venv.opt())?;
        } else {
            ctx.out
                .status(&format!("Found existing JDK at {}", jdk_home.display()));
        }

        ctx.shell
            .export("JAVA_HOME", jdk_home.display().to_string());
        ctx.shell.prepend_path(&jdk_home.join("bin"));
        ctx.jdk_home = Some(jdk_home);
        Ok(())
    }
}
