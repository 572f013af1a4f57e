//! Upload filename sanitization and storage.

use crate::BrowseError;
use crate::Result;
use crate::UploadRejection;
use crate::types::ResolvedEntry;
use std::fs;
use std::fs::OpenOptions;
use std::io;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;

/// Device names Windows refuses as filenames regardless of extension.
const WINDOWS_RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Reduces a client-supplied filename to a single safe path component.
///
/// Path separators become spaces, whitespace runs become `_`, and every
/// character outside `[A-Za-z0-9_.-]` is dropped. Leading and trailing `.`
/// and `_` are then stripped, so the result can never be `.`, `..` or a
/// hidden name. Windows device names get a `_` prefix on every platform.
///
/// Returns `None` if nothing usable remains.
///
/// # Examples
///
/// ```
/// use dirshare_core::sanitize_filename;
///
/// assert_eq!(sanitize_filename("../../evil.sh").as_deref(), Some("evil.sh"));
/// assert_eq!(sanitize_filename("my cv.pdf").as_deref(), Some("my_cv.pdf"));
/// assert_eq!(sanitize_filename("con.txt").as_deref(), Some("_con.txt"));
/// assert_eq!(sanitize_filename("../.."), None);
/// ```
#[must_use]
pub fn sanitize_filename(name: &str) -> Option<String> {
    let spaced = name.replace(['/', '\\'], " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    let filtered: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let trimmed = filtered.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        return None;
    }

    let stem = trimmed.split('.').next().unwrap_or(trimmed);
    if WINDOWS_RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(stem))
    {
        return Some(format!("_{trimmed}"));
    }

    Some(trimmed.to_string())
}

/// Stores uploaded content in `dir` under a sanitized name.
///
/// An existing file, symlink or hard link of the same name is unlinked and
/// replaced by a fresh file, never written through, so the content always
/// lands inside `dir`. The write is not atomic: a reader may observe a
/// partially written file.
///
/// # Errors
///
/// - `NotADirectory` if `dir` is a file
/// - `UploadRejected(EmptyFilename)` if `suggested_name` is empty
/// - `UploadRejected(UnsafeFilename)` if sanitization leaves nothing
/// - `UploadRejected(WriteFailed)` if the file cannot be created or written,
///   including when the name belongs to an existing directory
pub fn write_uploaded_file(
    dir: &ResolvedEntry,
    suggested_name: &str,
    mut content: impl Read,
) -> Result<PathBuf> {
    let dir = dir.require_directory()?;

    if suggested_name.is_empty() {
        return Err(BrowseError::upload(UploadRejection::EmptyFilename));
    }

    let Some(name) = sanitize_filename(suggested_name) else {
        debug!(suggested = suggested_name, "upload filename sanitized to nothing");
        return Err(BrowseError::upload(UploadRejection::UnsafeFilename));
    };

    let target = dir.path().join(&name);
    let written = replace_file(&target, &mut content)
        .map_err(|e| BrowseError::upload(UploadRejection::WriteFailed(e)))?;

    debug!(dir = dir.relative(), file = %name, bytes = written, "upload stored");
    Ok(target)
}

/// Creates `target` as a new file and copies `content` into it.
///
/// Any non-directory entry already at `target` is removed first. `create_new`
/// refuses to open through a link planted between the two steps.
fn replace_file(target: &Path, content: &mut impl Read) -> io::Result<u64> {
    match fs::symlink_metadata(target) {
        Ok(meta) if !meta.is_dir() => fs::remove_file(target)?,
        _ => {}
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)?;
    io::copy(content, &mut file)
}
