#![allow(deprecated)] // cargo_bin deprecation - still works fine

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

use common::TestFixture;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("semver-guard").expect("binary should exist");
    // Keep the host's CI context from leaking into the tests.
    cmd.env_remove("GITHUB_EVENT_NAME")
        .env_remove("GITHUB_HEAD_REF")
        .env_remove("GITHUB_BASE_REF")
        .env_remove("GITHUB_TOKEN");
    cmd
}

// ============================================================================
// Help and usage
// ============================================================================

#[test]
fn help_lists_both_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("install"));
}

#[test]
fn version_flag_reports_the_binary_name() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("semver-guard"));
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    cmd().assert().failure().code(2);
}

// ============================================================================
// Configuration errors (all reported before anything external runs)
// ============================================================================

#[test]
fn unknown_feature_group_exits_with_config_error() {
    cmd()
        .args(["check", "--no-config", "--feature-group", "most-features"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Unrecognized feature group"));
}

#[test]
fn unknown_release_type_exits_with_config_error() {
    cmd()
        .args(["check", "--no-config", "--release-type", "hotfix"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Unrecognized release type"));
}

#[test]
fn missing_explicit_config_file_is_reported() {
    cmd()
        .args(["check", "--config", "/nonexistent/guard.toml"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn malformed_config_file_is_reported() {
    let fixture = TestFixture::new();
    fixture.create_config("package = [unterminated\n");

    cmd()
        .arg("check")
        .current_dir(fixture.path())
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn unknown_config_key_is_rejected() {
    let fixture = TestFixture::new();
    let path = fixture.create_file("guard.toml", "pakcage = [\"typo\"]\n");

    cmd()
        .args(["check", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("TOML parse error"));
}

#[test]
fn missing_manifest_is_reported() {
    let fixture = TestFixture::new();

    cmd()
        .args(["check", "--no-config", "--manifest-path"])
        .arg(fixture.path().join("nope/Cargo.toml"))
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Manifest not found"));
}

#[test]
fn pull_request_without_branch_refs_is_reported() {
    cmd()
        .args(["check", "--no-config"])
        .env("GITHUB_EVENT_NAME", "pull_request")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("GITHUB_HEAD_REF"));
}

#[test]
fn install_with_missing_config_file_is_reported() {
    cmd()
        .args(["install", "--config", "/nonexistent/guard.toml"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Configuration file not found"));
}
