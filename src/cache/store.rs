use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;

use crate::{Result, SemverGuardError};

/// Result of a save attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// The key already exists (or there was nothing to persist). Only one
    /// save per key is authoritative; a duplicate is a benign no-op.
    Skipped,
}

/// Key/value blob cache for build artifacts.
pub trait ArtifactStore {
    /// Populate `path` from the entry stored under `key`. Returns `false`
    /// on a miss; absence is not an error.
    ///
    /// # Errors
    /// Returns an error when an existing entry cannot be unpacked.
    fn restore(&self, key: &str, path: &Path) -> Result<bool>;

    /// Persist the contents of `path` under `key`.
    ///
    /// # Errors
    /// Returns an error when the entry cannot be written.
    fn save(&self, key: &str, path: &Path) -> Result<SaveOutcome>;
}

/// Store keeping one gzipped tarball per key under a local root directory.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// # Errors
    /// Returns an error when the root directory cannot be created.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Store rooted in the per-user cache directory.
    ///
    /// # Errors
    /// Returns an error when no per-user cache directory can be determined
    /// or it cannot be created.
    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "semver-guard").ok_or_else(|| {
            SemverGuardError::Environment(
                "could not determine a per-user cache directory".to_string(),
            )
        })?;
        Self::new(dirs.cache_dir().join("artifacts"))
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.tar.gz"))
    }
}

impl ArtifactStore for LocalStore {
    fn restore(&self, key: &str, path: &Path) -> Result<bool> {
        let blob = self.blob_path(key);
        if !blob.is_file() {
            return Ok(false);
        }

        let file = fs::File::open(&blob)?;
        let mut archive = tar::Archive::new(GzDecoder::new(BufReader::new(file)));
        fs::create_dir_all(path)?;
        archive.unpack(path)?;
        Ok(true)
    }

    fn save(&self, key: &str, path: &Path) -> Result<SaveOutcome> {
        let blob = self.blob_path(key);
        if blob.exists() {
            return Ok(SaveOutcome::Skipped);
        }
        if !path.is_dir() {
            // Nothing was built; a run that failed before producing
            // artifacts has nothing worth persisting.
            return Ok(SaveOutcome::Skipped);
        }

        // Write to a temp file first so a failed pack never leaves a
        // truncated entry under the real key.
        let tmp = blob.with_extension("tmp");
        {
            let file = fs::File::create(&tmp)?;
            let encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
            let mut builder = tar::Builder::new(encoder);
            builder.append_dir_all(".", path)?;
            let encoder = builder.into_inner()?;
            let mut writer = encoder.finish()?;
            writer.flush()?;
        }
        fs::rename(&tmp, &blob)?;
        Ok(SaveOutcome::Saved)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
