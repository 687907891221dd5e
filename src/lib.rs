pub mod cache;
pub mod checker;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod env_config;
pub mod error;
pub mod git;
pub mod installer;
pub mod output;
pub mod process;
pub mod toolchain;

pub use error::{Result, SemverGuardError};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_CHECK_FAILED: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Build-artifact subdirectory, relative to the manifest directory.
///
/// The check runner pins `CARGO_TARGET_DIR` here and the cache coordinator
/// restores/saves the same path, so both always agree on where artifacts
/// live regardless of single-package vs workspace layout.
pub const ARTIFACT_SUBDIR: &str = "target/semver-checks";

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
