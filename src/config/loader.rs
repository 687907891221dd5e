use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::{Result, SemverGuardError};

/// Default configuration file, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".semver-guard.toml";

/// Options read from the configuration file. Every field is optional;
/// CLI arguments override anything set here.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Packages to check.
    #[serde(default)]
    pub package: Vec<String>,

    /// Packages to exclude.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Manifest of the project under check.
    #[serde(default)]
    pub manifest_path: Option<std::path::PathBuf>,

    /// Release type to assume (major, minor, patch).
    #[serde(default)]
    pub release_type: Option<String>,

    /// Feature group to enable.
    #[serde(default)]
    pub feature_group: Option<String>,

    /// Explicit features to enable.
    #[serde(default)]
    pub features: Vec<String>,

    /// Toolchain to provision.
    #[serde(default)]
    pub toolchain: Option<String>,
}

/// Load the configuration file.
///
/// An explicit `--config` path must exist; the default file is optional and
/// its absence yields the default configuration. `no_config` skips loading
/// entirely.
///
/// # Errors
/// Returns an error when an explicit path is missing or any file fails to
/// read or parse.
pub fn load_file_config(path: Option<&Path>, no_config: bool) -> Result<FileConfig> {
    if no_config {
        return Ok(FileConfig::default());
    }

    match path {
        Some(explicit) => {
            if !explicit.is_file() {
                return Err(SemverGuardError::Config(format!(
                    "Configuration file not found: {}",
                    explicit.display()
                )));
            }
            parse_file(explicit)
        }
        None => {
            let default = Path::new(CONFIG_FILE_NAME);
            if default.is_file() {
                parse_file(default)
            } else {
                Ok(FileConfig::default())
            }
        }
    }
}

fn parse_file(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
