//! Explicit per-stage environment configuration.
//!
//! Pipeline stages never mutate the process environment. Each stage records
//! its variable overrides and PATH prepends here, and the accumulated
//! configuration is applied to every subsequent subprocess invocation. This
//! keeps cross-stage coupling visible and leaves the host process untouched
//! for whatever runs after us.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::PathBuf;

/// Environment overrides threaded through the pipeline stages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    vars: BTreeMap<String, String>,
    path_prepends: Vec<PathBuf>,
}

impl EnvConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable unconditionally.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Set a variable only when neither the process environment nor this
    /// configuration already defines it. Pre-existing operator choices are
    /// never overwritten.
    ///
    /// Returns whether the value was applied.
    pub fn set_if_unset(&mut self, key: &str, value: impl Into<String>) -> bool {
        if std::env::var_os(key).is_some() || self.vars.contains_key(key) {
            return false;
        }
        self.vars.insert(key.to_string(), value.into());
        true
    }

    /// Put a directory in front of the executable search path.
    pub fn prepend_path(&mut self, dir: impl Into<PathBuf>) {
        self.path_prepends.push(dir.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn path_prepends(&self) -> &[PathBuf] {
        &self.path_prepends
    }

    /// The effective executable search path: prepended directories followed
    /// by the process `PATH`.
    #[must_use]
    pub fn search_path(&self) -> OsString {
        let existing = std::env::var_os("PATH").unwrap_or_default();
        if self.path_prepends.is_empty() {
            return existing;
        }
        std::env::join_paths(
            self.path_prepends
                .iter()
                .cloned()
                .chain(std::env::split_paths(&existing)),
        )
        .unwrap_or(existing)
    }

    /// Key/value pairs to apply to a subprocess invocation.
    #[must_use]
    pub fn invocation_env(&self) -> Vec<(String, String)> {
        let mut env: Vec<(String, String)> = self
            .vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        if !self.path_prepends.is_empty() {
            env.push((
                "PATH".to_string(),
                self.search_path().to_string_lossy().into_owned(),
            ));
        }
        env
    }
}

#[cfg(test)]
#[path = "env_config_tests.rs"]
mod tests;
