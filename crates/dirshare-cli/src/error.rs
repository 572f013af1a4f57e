//! Error conversion utilities for CLI.
//!
//! Converts dirshare-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use dirshare_core::BrowseError;
use std::path::Path;

/// Converts `BrowseError` to a user-friendly anyhow error with context.
pub fn convert_browse_error(err: BrowseError, root: &Path, request: &str) -> anyhow::Error {
    match err {
        BrowseError::PathRejected => anyhow!(
            "Path '/{request}' not found under '{}'\n\
             HINT: Paths are relative to --root and may not leave it, \
             including through symlinks.",
            root.display()
        ),
        BrowseError::NotADirectory { path } => anyhow!(
            "'/{path}' is a file, not a directory\n\
             HINT: Pass the directory that contains it."
        ),
        BrowseError::InvalidRoot { path, reason } => anyhow!(
            "Cannot use '{}' as root: {reason}\n\
             HINT: Use --root or DIRSHARE_ROOT to choose an existing directory.",
            path.display()
        ),
        BrowseError::ArchiveBuildFailure { source } => anyhow!(
            "Failed to build archive of '/{request}': {source}\n\
             HINT: Check that every file below it is readable."
        ),
        BrowseError::AccessFailure { source } => {
            anyhow!("Cannot read '/{request}' under '{}': {source}", root.display())
        }
        _ => anyhow::Error::from(err).context(format!("Error processing '/{request}'")),
    }
}

/// Adds CLI context to a core result.
pub fn add_browse_context<T>(
    result: Result<T, BrowseError>,
    root: &Path,
    request: &str,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_browse_error(e, root, request))
}
