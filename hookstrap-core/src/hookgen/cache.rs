//! Artifact Cache Check
//!
//! Decides whether a previously derived hook module is still valid relative
//! to its source module, based on modification timestamps. A stale artifact
//! is removed here so the generator never overwrites in place.

use crate::hookgen::error::GenerationError;
use std::fs;
use std::path::Path;

/// Result of the staleness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// The artifact exists and is newer than the source; leave it untouched.
    Fresh,
    /// The artifact is missing or out of date; regeneration must run.
    Stale,
}

/// Check whether the derived artifact is up to date.
///
/// Returns `Stale` if the artifact is missing, or if the source's
/// modification time is newer than or equal to the artifact's. When an
/// out-of-date artifact exists it is deleted before this function returns,
/// so the generator always writes to a fresh path.
///
/// # Errors
/// Filesystem access failures are fatal startup errors and propagate.
pub fn check(source: &Path, artifact: &Path) -> Result<Freshness, GenerationError> {
    if !artifact.exists() {
        log::debug!("Hook module {} not present, generating", artifact.display());
        return Ok(Freshness::Stale);
    }

    let source_mtime = fs::metadata(source)
        .and_then(|m| m.modified())
        .map_err(|e| GenerationError::io(source, e))?;
    let artifact_mtime = fs::metadata(artifact)
        .and_then(|m| m.modified())
        .map_err(|e| GenerationError::io(artifact, e))?;

    // Only regenerate when the source is at least as new as the artifact.
    if artifact_mtime > source_mtime {
        log::debug!("Hook module {} is up to date", artifact.display());
        return Ok(Freshness::Fresh);
    }

    log::info!(
        "Hook module {} is stale, removing before regeneration",
        artifact.display()
    );
    fs::remove_file(artifact).map_err(|e| GenerationError::io(artifact, e))?;

    Ok(Freshness::Stale)
}
