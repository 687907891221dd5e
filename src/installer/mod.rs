//! Tool installation: presence check, precompiled download, source build.

pub mod archive;
pub mod release;

use std::fmt;
use std::path::PathBuf;

pub use archive::extract_tarball;
pub use release::{GithubReleaseIndex, Release, ReleaseAsset, ReleaseIndex, TOOL_NAME, TOOL_OWNER};

use crate::env_config::EnvConfig;
use crate::process::{Invocation, Runner};
use crate::{Result, SemverGuardError};

/// Target triple this binary was compiled for; release assets are matched
/// against it.
pub const TARGET_TRIPLE: &str = env!("TARGET_TRIPLE");

/// How the tool ended up available. Observable for diagnostics; drives no
/// further state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The binary was already on the search path.
    AlreadyPresent,
    /// A precompiled release asset was downloaded and extracted.
    Downloaded { version: String },
    /// The download failed and the tool was built from the registry instead.
    /// The original download error is recorded, not masked.
    BuiltFromSource { download_error: String },
}

impl fmt::Display for InstallOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyPresent => write!(f, "already present"),
            Self::Downloaded { version } => {
                write!(f, "installed {version} from a precompiled release asset")
            }
            Self::BuiltFromSource { download_error } => {
                write!(f, "built from source (download failed: {download_error})")
            }
        }
    }
}

/// Guarantees the checker binary is present.
///
/// State machine: check-presence → done | try-download → done |
/// try-build → done-or-fatal. There is no third strategy.
pub struct ToolInstaller<'a> {
    runner: &'a dyn Runner,
    index: &'a dyn ReleaseIndex,
    lookup_dirs: Vec<PathBuf>,
    tool_dir: PathBuf,
    target: String,
}

impl<'a> ToolInstaller<'a> {
    /// Installer over the real search path and the per-user tool directory.
    ///
    /// # Errors
    /// Returns an error when no per-user cache directory can be determined.
    pub fn new(runner: &'a dyn Runner, index: &'a dyn ReleaseIndex, env: &EnvConfig) -> Result<Self> {
        Ok(Self::with_paths(
            runner,
            index,
            std::env::split_paths(&env.search_path()).collect(),
            default_tool_dir()?,
            TARGET_TRIPLE,
        ))
    }

    /// Installer with explicit lookup directories and tool directory.
    #[must_use]
    pub fn with_paths(
        runner: &'a dyn Runner,
        index: &'a dyn ReleaseIndex,
        lookup_dirs: Vec<PathBuf>,
        tool_dir: PathBuf,
        target: impl Into<String>,
    ) -> Self {
        Self {
            runner,
            index,
            lookup_dirs,
            tool_dir,
            target: target.into(),
        }
    }

    /// Make the tool available, preferring the precompiled download.
    ///
    /// Idempotent: repeated runs on an already-provisioned machine do no
    /// network or build work. On download success the tool directory is
    /// prepended to the stage environment's search path.
    ///
    /// # Errors
    /// Returns an error only when the source-build fallback itself fails.
    pub fn ensure_installed(&self, env: &mut EnvConfig) -> Result<InstallOutcome> {
        if self.find_tool().is_some() {
            return Ok(InstallOutcome::AlreadyPresent);
        }

        match self.try_download() {
            Ok(version) => {
                env.prepend_path(self.tool_dir.clone());
                Ok(InstallOutcome::Downloaded { version })
            }
            Err(download_error) => {
                eprintln!(
                    "Warning: precompiled download failed ({download_error}); building from source"
                );
                self.build_from_source()?;
                Ok(InstallOutcome::BuiltFromSource {
                    download_error: download_error.to_string(),
                })
            }
        }
    }

    fn find_tool(&self) -> Option<PathBuf> {
        let file_name = binary_file_name();
        self.lookup_dirs
            .iter()
            .map(|dir| dir.join(&file_name))
            .find(|candidate| candidate.is_file())
    }

    fn try_download(&self) -> Result<String> {
        let release = self.index.latest_release()?;
        let asset = release.asset_for_target(&self.target)?;
        let bytes = self.index.download(&asset.browser_download_url)?;
        extract_tarball(&bytes, &self.tool_dir)?;

        if !self.tool_dir.join(binary_file_name()).is_file() {
            return Err(SemverGuardError::Install(format!(
                "asset '{}' did not contain a {TOOL_NAME} binary",
                asset.name
            )));
        }
        Ok(release.tag_name)
    }

    /// From-source fallback: a registry install with locked dependency
    /// versions. Allowed to fail fatally.
    fn build_from_source(&self) -> Result<()> {
        let result = self
            .runner
            .run(&Invocation::new("cargo").args(["install", TOOL_NAME, "--locked"]))?;
        if result.success() {
            Ok(())
        } else {
            Err(SemverGuardError::Install(format!(
                "cargo install {TOOL_NAME} failed (exit code {}): {}",
                result.exit_code,
                result.stderr.trim()
            )))
        }
    }
}

fn binary_file_name() -> String {
    if cfg!(windows) {
        format!("{TOOL_NAME}.exe")
    } else {
        TOOL_NAME.to_string()
    }
}

fn default_tool_dir() -> Result<PathBuf> {
    directories::ProjectDirs::from("", "", "semver-guard")
        .map(|dirs| dirs.cache_dir().join("tools"))
        .ok_or_else(|| {
            SemverGuardError::Environment(
                "could not determine a per-user cache directory".to_string(),
            )
        })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
