use std::path::Path;

use flate2::read::GzDecoder;
use tar::Archive;

use crate::{Result, SemverGuardError};

/// Unpack a gzipped tarball into `dest`, creating the directory first.
///
/// # Errors
/// Returns an installation error when the archive is malformed or an entry
/// cannot be written.
pub fn extract_tarball(bytes: &[u8], dest: &Path) -> Result<()> {
    std::fs::create_dir_all(dest)?;
    let mut archive = Archive::new(GzDecoder::new(bytes));
    archive.unpack(dest).map_err(|e| {
        SemverGuardError::Install(format!(
            "failed to extract release archive into {}: {e}",
            dest.display()
        ))
    })
}

#[cfg(test)]
#[path = "archive_tests.rs"]
mod tests;
