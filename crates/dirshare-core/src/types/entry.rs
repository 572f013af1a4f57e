//! Confined entry produced by path resolution.

use crate::BrowseError;
use crate::Result;
use std::path::Path;
use std::path::PathBuf;

/// Name used when the archived directory has no base name (e.g. `/`).
const FALLBACK_NAME: &str = "root";

/// Kind of a resolved filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A directory.
    Directory,
    /// A regular file.
    File,
}

impl EntryKind {
    /// Returns a lowercase label for display.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::File => "file",
        }
    }
}

/// A path that has passed root confinement.
///
/// The only way to obtain a `ResolvedEntry` is [`Root::resolve`], so any
/// function taking one is guaranteed to receive a canonical path inside the
/// root.
///
/// [`Root::resolve`]: crate::types::Root::resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    path: PathBuf,
    root: PathBuf,
    relative: String,
    kind: EntryKind,
}

impl ResolvedEntry {
    pub(crate) const fn new(
        path: PathBuf,
        root: PathBuf,
        relative: String,
        kind: EntryKind,
    ) -> Self {
        Self {
            path,
            root,
            relative,
            kind,
        }
    }

    /// Canonical root this entry was resolved against.
    pub(crate) fn root(&self) -> &Path {
        &self.root
    }

    /// Canonical absolute path of the entry.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Normalized `/`-separated path relative to the root.
    ///
    /// Empty for the root itself.
    #[inline]
    #[must_use]
    pub fn relative(&self) -> &str {
        &self.relative
    }

    /// Kind of the entry.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Returns `true` for directories.
    #[inline]
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Returns `true` for regular files.
    #[inline]
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// Returns `true` if this entry is the root directory.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.relative.is_empty()
    }

    /// Base name of the entry on disk.
    ///
    /// Falls back to `"root"` when the path has no final component.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path.file_name().map_or_else(
            || FALLBACK_NAME.to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
    }

    /// Attachment name for the archive of this directory: `<name>.zip`.
    #[must_use]
    pub fn archive_name(&self) -> String {
        format!("{}.zip", self.file_name())
    }

    /// Fails with `NotADirectory` unless this entry is a directory.
    pub fn require_directory(&self) -> Result<&Self> {
        if self.is_dir() {
            Ok(self)
        } else {
            Err(BrowseError::NotADirectory {
                path: self.relative.clone(),
            })
        }
    }

    /// Fails with `NotAFile` unless this entry is a regular file.
    pub fn require_file(&self) -> Result<&Self> {
        if self.is_file() {
            Ok(self)
        } else {
            Err(BrowseError::NotAFile {
                path: self.relative.clone(),
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn entry(path: &str, relative: &str, kind: EntryKind) -> ResolvedEntry {
        ResolvedEntry::new(
            PathBuf::from(path),
            PathBuf::from("/"),
            relative.to_string(),
            kind,
        )
    }

    #[test]
    fn test_archive_name_uses_base_name() {
        let dir = entry("/data/reports/2024", "reports/2024", EntryKind::Directory);
        assert_eq!(dir.file_name(), "2024");
        assert_eq!(dir.archive_name(), "2024.zip");
    }

    #[test]
    fn test_archive_name_falls_back_for_filesystem_root() {
        let dir = entry("/", "", EntryKind::Directory);
        assert_eq!(dir.archive_name(), "root.zip");
        assert!(dir.is_root());
    }

    #[test]
    fn test_require_directory() {
        let file = entry("/data/a.txt", "a.txt", EntryKind::File);
        let err = file.require_directory().unwrap_err();
        assert!(matches!(err, BrowseError::NotADirectory { ref path } if path == "a.txt"));

        let dir = entry("/data", "", EntryKind::Directory);
        assert!(dir.require_directory().is_ok());
        assert!(matches!(
            dir.require_file(),
            Err(BrowseError::NotAFile { .. })
        ));
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(EntryKind::Directory.as_str(), "directory");
        assert_eq!(EntryKind::File.as_str(), "file");
    }
}
