//! Artifact-cache coordination.
//!
//! Restores previously built documentation/API-model artifacts before the
//! check and persists them afterwards, keyed to the dependency lock state
//! and manifest location. The coordinator never inspects crate source.

pub mod store;

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

pub use store::{ArtifactStore, LocalStore, SaveOutcome};

use crate::{ARTIFACT_SUBDIR, Result};

const KEY_VERSION: u32 = 1;

/// Derive the opaque cache key from the dependency lock file and the
/// manifest directory path. A missing lock file hashes as empty, so fresh
/// projects still get a stable key.
///
/// # Errors
/// Returns an error when an existing lock file cannot be read.
pub fn cache_key(manifest_dir: &Path) -> Result<String> {
    let lock_path = manifest_dir.join("Cargo.lock");
    let lock_bytes = if lock_path.is_file() {
        fs::read(&lock_path)?
    } else {
        Vec::new()
    };

    let mut hasher = Sha256::new();
    hasher.update(&lock_bytes);
    hasher.update(manifest_dir.to_string_lossy().as_bytes());
    Ok(format!("semver-guard-v{KEY_VERSION}-{:x}", hasher.finalize()))
}

/// Couples one artifact path with one cache key for the duration of a run.
pub struct CacheCoordinator<'a> {
    store: &'a dyn ArtifactStore,
    key: String,
    path: PathBuf,
}

impl<'a> CacheCoordinator<'a> {
    /// # Errors
    /// Returns an error when the cache key cannot be derived.
    pub fn new(store: &'a dyn ArtifactStore, manifest_dir: &Path) -> Result<Self> {
        Ok(Self {
            store,
            key: cache_key(manifest_dir)?,
            path: manifest_dir.join(ARTIFACT_SUBDIR),
        })
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn artifact_path(&self) -> &Path {
        &self.path
    }

    /// Populate the artifact path from the store. A miss (`Ok(false)`) is
    /// not an error; the check simply runs a cold build.
    ///
    /// # Errors
    /// Returns an error when a stored entry exists but cannot be unpacked.
    pub fn restore(&self) -> Result<bool> {
        self.store.restore(&self.key, &self.path)
    }

    /// Persist the artifact path back to the store. Runs even after a failed
    /// check: a successful partial build is still valuable for the next run.
    ///
    /// # Errors
    /// Returns an error when the entry cannot be written.
    pub fn save(&self) -> Result<SaveOutcome> {
        self.store.save(&self.key, &self.path)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
