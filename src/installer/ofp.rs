//! Open Fortran Parser patching.
//!
//! The OFP wheel on PyPI reports a version its own dependency fetch cannot
//! resolve. After the editable install, this stage overwrites the package's
//! version file with the pinned string, runs OFP's dependency fetch, copies
//! the downloaded jars into the package's `lib` folder, and rebuilds its
//! bundled artifacts with Ant.

use crate::error::{Result, SetupError};
use crate::shell::{execute_check, CommandOptions};
use std::fs;
use std::path::{Path, PathBuf};

use super::venv::shquote;
use super::{pins, InstallContext, Stage};

/// Stage 7: patch the installed `open_fortran_parser` package.
pub struct OfpPatch;

impl Stage for OfpPatch {
    fn name(&self) -> &'static str {
        "ofp-patch"
    }

    fn run(&self, ctx: &mut InstallContext) -> Result<()> {
        let venv = ctx.venv()?.clone();
        let capture = !ctx.out.mode().shows_command_output();
        let python = shquote(&venv.python().display().to_string());

        let package_dir = locate_package(ctx, &python)?;
        ctx.out.status(&format!(
            "Patching {} to version {}",
            pins::OFP_PACKAGE,
            pins::OFP_VERSION
        ));
        write_version_file(&package_dir, pins::OFP_VERSION)?;

        // OFP fetches its jars relative to the working directory.
        let fetch_dir = venv.downloads().join("ofp");
        fs::create_dir_all(&fetch_dir)?;
        ctx.out.status("Fetching OFP dependencies");
        execute_check(
            &format!("{python} -m {}.dependencies", pins::OFP_PACKAGE),
            &ctx.shell,
            &CommandOptions {
                cwd: Some(fetch_dir.clone()),
                capture_stdout: capture,
                capture_stderr: capture,
            },
        )?;

        let lib = package_dir.join("lib");
        fs::create_dir_all(&lib)?;
        for jar in collect_jars(&fetch_dir)? {
            let name = jar.file_name().expect("jar paths end in a file name");
            fs::copy(&jar, lib.join(name))?;
            ctx.classpath.push(lib.join(name));
        }

        ctx.out.status("Rebuilding OFP artifacts");
        execute_check(
            "ant",
            &ctx.shell,
            &CommandOptions {
                cwd: Some(package_dir),
                capture_stdout: capture,
                capture_stderr: capture,
            },
        )?;
        Ok(())
    }
}

/// Locate the installed package directory via the venv interpreter.
fn locate_package(ctx: &InstallContext, python: &str) -> Result<PathBuf> {
    let result = execute_check(
        &format!(
            "{python} -c 'import {pkg}, pathlib; print(pathlib.Path({pkg}.__file__).parent)'",
            pkg = pins::OFP_PACKAGE
        ),
        &ctx.shell,
        &CommandOptions::captured(),
    )
    .map_err(|_| SetupError::PackageNotFound {
        package: pins::OFP_PACKAGE.to_string(),
    })?;

    let path = PathBuf::from(result.stdout.trim());
    if path.as_os_str().is_empty() {
        return Err(SetupError::PackageNotFound {
            package: pins::OFP_PACKAGE.to_string(),
        });
    }
    Ok(path)
}

/// Overwrite the package's `_version.py` with the pinned version string.
fn write_version_file(package_dir: &Path, version: &str) -> Result<()> {
    let path = package_dir.join("_version.py");
    fs::write(&path, format!("VERSION = '{version}'\n"))?;
    Ok(())
}

/// Jar files directly under `dir`, sorted by name.
fn collect_jars(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut jars: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "jar"))
        .collect();
    jars.sort();
    Ok(jars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn version_file_contains_pinned_string() {
        let temp = TempDir::new().unwrap();
        write_version_file(temp.path(), pins::OFP_VERSION).unwrap();
        let content = fs::read_to_string(temp.path().join("_version.py")).unwrap();
        assert_eq!(content, format!("VERSION = '{}'\n", pins::OFP_VERSION));
    }

    #[test]
    fn collect_jars_filters_and_sorts() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.jar"), "").unwrap();
        fs::write(temp.path().join("a.jar"), "").unwrap();
        fs::write(temp.path().join("notes.txt"), "").unwrap();

        let jars = collect_jars(temp.path()).unwrap();
        assert_eq!(jars.len(), 2);
        assert!(jars[0].ends_with("a.jar"));
        assert!(jars[1].ends_with("b.jar"));
    }
}
