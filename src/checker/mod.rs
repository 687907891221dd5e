//! Invocation of the API-diffing tool.

pub mod args;

pub use args::assemble_args;

use crate::ARTIFACT_SUBDIR;
use crate::config::CheckConfig;
use crate::env_config::EnvConfig;
use crate::process::{CommandResult, Invocation, Runner};
use crate::Result;

/// Runs `cargo semver-checks check-release` with the stage environment and
/// the build-output directory pinned.
pub struct CheckRunner<'a> {
    runner: &'a dyn Runner,
}

impl<'a> CheckRunner<'a> {
    #[must_use]
    pub const fn new(runner: &'a dyn Runner) -> Self {
        Self { runner }
    }

    /// Invoke the checker. The exit code comes back as data so the caller
    /// can reach cache save before reporting failure.
    ///
    /// `CARGO_TARGET_DIR` is pinned to the fixed artifact directory; the
    /// default location differs between single-package and workspace
    /// layouts, and the cache coordinator must agree with the checker on
    /// where artifacts live.
    ///
    /// # Errors
    /// Returns an error only when the checker cannot be spawned.
    pub fn run(
        &self,
        config: &CheckConfig,
        baseline_rev: Option<&str>,
        env: &EnvConfig,
    ) -> Result<CommandResult> {
        let target_dir = config.manifest_dir().join(ARTIFACT_SUBDIR);
        let invocation = Invocation::new("cargo")
            .args(["semver-checks", "check-release"])
            .args(assemble_args(config, baseline_rev))
            .env_config(env)
            .env("CARGO_TARGET_DIR", target_dir.to_string_lossy());
        self.runner.run(&invocation)
    }
}
