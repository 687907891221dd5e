//! Toolchain provisioning via rustup.

use regex::Regex;

use crate::config::model::MANUAL_TOOLCHAIN;
use crate::env_config::EnvConfig;
use crate::process::{Invocation, Runner};
use crate::{Result, SemverGuardError};

/// Toolchain versions whose registry code cannot use the sparse protocol.
const SPARSE_INCOMPATIBLE: [&str; 2] = ["1.66", "1.67"];

/// Installs and pins a toolchain and sets build-environment knobs.
///
/// The pin goes through `RUSTUP_TOOLCHAIN` in the stage environment, never
/// through `rustup default`: the system-wide toolchain selection stays
/// untouched for concurrent or later unrelated steps.
pub struct ToolchainProvisioner<'a> {
    runner: &'a dyn Runner,
}

impl<'a> ToolchainProvisioner<'a> {
    #[must_use]
    pub const fn new(runner: &'a dyn Runner) -> Self {
        Self { runner }
    }

    /// Ensure the named toolchain is available and record the environment
    /// for the remaining stages. `"manual"` skips installation and pinning.
    ///
    /// The incremental-compilation, color and registry-protocol knobs are
    /// applied set-if-unset, so operator choices already present in the
    /// environment win.
    ///
    /// # Errors
    /// Returns an error when rustup or rustc cannot be run or the install
    /// fails.
    pub fn provision(&self, toolchain: &str, env: &mut EnvConfig) -> Result<()> {
        if toolchain != MANUAL_TOOLCHAIN {
            let result = self.runner.run(
                &Invocation::new("rustup").args(["toolchain", "install", toolchain, "--no-self-update"]),
            )?;
            if !result.success() {
                return Err(SemverGuardError::Toolchain(format!(
                    "failed to install toolchain '{toolchain}': {}",
                    result.stderr.trim()
                )));
            }
            env.set("RUSTUP_TOOLCHAIN", toolchain);
        }

        // Deterministic rebuilds keep the artifact cache honest.
        env.set_if_unset("CARGO_INCREMENTAL", "0");
        env.set_if_unset("CARGO_TERM_COLOR", "always");
        if self.sparse_registry_supported(env)? {
            env.set_if_unset("CARGO_REGISTRIES_CRATES_IO_PROTOCOL", "sparse");
        }
        Ok(())
    }

    /// Query the active compiler and gate the sparse registry protocol on
    /// its reported version.
    fn sparse_registry_supported(&self, env: &EnvConfig) -> Result<bool> {
        let result = self
            .runner
            .run(&Invocation::new("rustc").arg("--version").env_config(env))?
            .require_success("rustc")?;
        Ok(version_allows_sparse(&result.stdout))
    }
}

/// Check the `rustc --version` banner against the known-incompatible
/// versions. Unparsable output is treated as recent enough.
fn version_allows_sparse(banner: &str) -> bool {
    Regex::new(r"rustc (\d+\.\d+)")
        .ok()
        .and_then(|re| {
            re.captures(banner)
                .map(|caps| !SPARSE_INCOMPATIBLE.contains(&&caps[1]))
        })
        .unwrap_or(true)
}

#[cfg(test)]
#[path = "toolchain_tests.rs"]
mod tests;
