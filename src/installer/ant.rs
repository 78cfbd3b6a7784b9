//! Optional Apache Ant installation.
//!
//! Downloads the pinned Ant distribution and the NetRexx jar its optional
//! tasks need. The NetRexx artifact is the only download in the pipeline
//! verified against a digest; everything else is trusted verbatim.

use crate::error::Result;
use crate::net::download::extract_tar_gz;
use crate::net::Downloader;
use crate::shell::{execute_check, CommandOptions};
use std::fs;

use super::venv::shquote;
use super::{pins, InstallConfig, InstallContext, Stage};

/// Stage 5: self-installed Ant with the NetRexx optional dependency.
pub struct AntInstall;

impl Stage for AntInstall {
    fn name(&self) -> &'static str {
        "ant"
    }

    fn enabled(&self, config: &InstallConfig) -> bool {
        config.with_ant
    }

    fn run(&self, ctx: &mut InstallContext) -> Result<()> {
        let venv = ctx.venv()?.clone();
        let show_progress = ctx.out.mode().shows_status();
        let downloader = Downloader::new(&venv.downloads(), show_progress)?;

        ctx.out.status("Downloading Apache Ant");
        let archive = downloader.fetch(pins::ANT_URL)?;

        ctx.out.status("Verifying NetRexx dependency");
        let netrexx = downloader.fetch_verified(pins::NETREXX_URL, pins::NETREXX_SHA256)?;

        ctx.out.status("Extracting Ant");
        let ant_home = extract_tar_gz(&archive, &venv.opt())?;

        let lib = ant_home.join("lib");
        fs::copy(&netrexx, lib.join("NetRexxC.jar"))?;
        ctx.classpath.push(lib.join("NetRexxC.jar"));

        // Secondary fetch for Ant's optional components, now that the
        // NetRexx jar satisfies their task definitions.
        ctx.out.status("Fetching Ant optional components");
        let ant_bin = ant_home.join("bin").join("ant");
        execute_check(
            &format!(
                "{} -f fetch.xml -Ddest=optional",
                shquote(&ant_bin.display().to_string())
            ),
            &ctx.shell,
            &CommandOptions::captured_in(&ant_home),
        )?;

        ctx.shell.prepend_path(&ant_home.join("bin"));
        ctx.shell
            .export("ANT_HOME", ant_home.display().to_string());
        ctx.ant_home = Some(ant_home);
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
        assert!(!AntInstall.enabled(&cfg));
    }

    #[test]
    fn netrexx_digest_is_pinned_lowercase_hex() {
        assert_eq!(pins::NETREXX_SHA256.len(), 64);
        assert!(pins::NETREXX_SHA256
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
