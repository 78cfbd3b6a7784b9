//! Integration tests for the `resolve` command.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn loki_setup() -> Command {
    Command::new(cargo_bin("loki-setup"))
}

fn create_fake_binary(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "#!/bin/sh\n").unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }
}

#[test]
fn managed_resolution_joins_venv_bin() {
    loki_setup()
        .args(["resolve", "--venv-bin", "/a/b", "loki-transform.py"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/a/b/loki-transform.py"));
}

#[test]
fn no_install_miss_renders_unresolved_not_an_error() {
    let empty = TempDir::new().unwrap();
    loki_setup()
        .args(["resolve", "--no-install", "loki-transform.py"])
        .env("PATH", empty.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("<unresolved>"));
}

#[test]
fn no_install_finds_tools_on_path() {
    let bin = TempDir::new().unwrap();
    create_fake_binary(&bin.path().join("loki-lint.py"));

    loki_setup()
        .args(["resolve", "--no-install", "loki-lint.py"])
        .env("PATH", bin.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            bin.path().join("loki-lint.py").display().to_string(),
        ));
}

#[test]
fn managed_claw_emits_ordering_dependency_in_cmake() {
    loki_setup()
        .args([
            "resolve",
            "--venv-bin",
            "/venv/bin",
            "--with-claw",
            "--format",
            "cmake",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "add_dependencies( loki-transform.py clawfc )",
        ))
        .stdout(predicate::str::contains(
            "IMPORTED_LOCATION \"/venv/bin/clawfc\"",
        ));
}

#[test]
fn disabled_claw_resolves_from_search_path_without_dependency() {
    let empty = TempDir::new().unwrap();
    loki_setup()
        .args([
            "resolve",
            "--venv-bin",
            "/venv/bin",
            "--format",
            "cmake",
        ])
        .env("PATH", empty.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("IMPORTED_LOCATION \"\""))
        .stdout(predicate::str::contains("add_dependencies").not());
}

#[test]
fn json_format_reports_strategies() {
    loki_setup()
        .args(["resolve", "--venv-bin", "/venv/bin", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"strategy\": \"venv-bin\""));
}

#[test]
fn output_flag_writes_fragment_to_file() {
    let temp = TempDir::new().unwrap();
    let out_file = temp.path().join("loki-targets.cmake");

    loki_setup()
        .args(["resolve", "--venv-bin", "/venv/bin", "--format", "cmake"])
        .arg("--output")
        .arg(&out_file)
        .assert()
        .success();

    let fragment = fs::read_to_string(out_file).unwrap();
    assert!(fragment.contains("add_executable( loki-transform.py IMPORTED GLOBAL )"));
}
