use super::*;
use crate::process::testing::{ScriptedRunner, result_with};

#[test]
fn provision_installs_named_toolchain_and_pins_it() {
    let runner = ScriptedRunner::new()
        .respond("rustc", None, result_with("rustc 1.81.0 (abc 2024-09-01)\n", "", 0));
    let mut env = EnvConfig::new();
    ToolchainProvisioner::new(&runner)
        .provision("1.81", &mut env)
        .unwrap();

    assert_eq!(runner.count_of("rustup", "toolchain"), 1);
    let install = &runner.invocations()[0];
    assert_eq!(
        install.args,
        vec!["toolchain", "install", "1.81", "--no-self-update"]
    );
    assert_eq!(env.get("RUSTUP_TOOLCHAIN"), Some("1.81"));
}

#[test]
fn manual_toolchain_skips_rustup_and_pinning() {
    let runner = ScriptedRunner::new();
    let mut env = EnvConfig::new();
    ToolchainProvisioner::new(&runner)
        .provision("manual", &mut env)
        .unwrap();

    assert_eq!(runner.count_of("rustup", "toolchain"), 0);
    assert_eq!(env.get("RUSTUP_TOOLCHAIN"), None);
}

#[test]
fn failed_install_is_a_toolchain_error() {
    let runner = ScriptedRunner::new().respond(
        "rustup",
        Some("toolchain"),
        result_with("", "error: unknown toolchain\n", 1),
    );
    let mut env = EnvConfig::new();
    let err = ToolchainProvisioner::new(&runner)
        .provision("nope", &mut env)
        .unwrap_err();
    match err {
        SemverGuardError::Toolchain(msg) => {
            assert!(msg.contains("nope"));
            assert!(msg.contains("unknown toolchain"));
        }
        other => panic!("Expected Toolchain error, got {other}"),
    }
}

#[test]
fn sparse_protocol_not_forced_on_incompatible_toolchain() {
    let runner = ScriptedRunner::new()
        .respond("rustc", None, result_with("rustc 1.66.1 (abc 2023-01-10)\n", "", 0));
    let mut env = EnvConfig::new();
    ToolchainProvisioner::new(&runner)
        .provision("manual", &mut env)
        .unwrap();
    assert_eq!(env.get("CARGO_REGISTRIES_CRATES_IO_PROTOCOL"), None);
}

#[test]
fn sparse_protocol_set_on_recent_toolchain() {
    let runner = ScriptedRunner::new()
        .respond("rustc", None, result_with("rustc 1.81.0 (abc 2024-09-01)\n", "", 0));
    let mut env = EnvConfig::new();
    ToolchainProvisioner::new(&runner)
        .provision("manual", &mut env)
        .unwrap();
    // A value already present in the process environment wins.
    if std::env::var_os("CARGO_REGISTRIES_CRATES_IO_PROTOCOL").is_none() {
        assert_eq!(
            env.get("CARGO_REGISTRIES_CRATES_IO_PROTOCOL"),
            Some("sparse")
        );
    }
}

#[test]
fn failed_rustc_probe_is_fatal() {
    let runner = ScriptedRunner::new().respond("rustc", None, result_with("", "boom\n", 1));
    let mut env = EnvConfig::new();
    let err = ToolchainProvisioner::new(&runner)
        .provision("manual", &mut env)
        .unwrap_err();
    assert!(matches!(err, SemverGuardError::CommandFailed { .. }));
}

// =============================================================================
// Version banner parsing
// =============================================================================

#[test]
fn version_allows_sparse_rejects_known_incompatible() {
    assert!(!version_allows_sparse("rustc 1.66.1 (90743e729 2023-01-10)"));
    assert!(!version_allows_sparse("rustc 1.67.0 (fc594f156 2023-01-24)"));
}

#[test]
fn version_allows_sparse_accepts_recent() {
    assert!(version_allows_sparse("rustc 1.68.0 (2c8cc3432 2023-03-06)"));
    assert!(version_allows_sparse("rustc 1.81.0 (eeb90cda1 2024-09-04)"));
}

#[test]
fn version_allows_sparse_tolerates_garbage() {
    assert!(version_allows_sparse(""));
    assert!(version_allows_sparse("not a version banner"));
}
