//! The browsing root and root-confined path resolution.

use crate::BrowseConfig;
use crate::BrowseError;
use crate::Result;
use crate::types::EntryKind;
use crate::types::ResolvedEntry;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;

/// The directory beyond which no operation may read or write.
///
/// `Root` is fixed at process start and never changes. It holds the
/// canonical form of the configured directory so that every confinement
/// check compares canonical paths against a canonical anchor.
///
/// # Examples
///
/// ```no_run
/// use dirshare_core::Root;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let root = Root::new("/srv/share")?;
///
/// let entry = root.resolve("reports/2024")?;
/// assert!(entry.path().starts_with(root.as_path()));
///
/// // Traversal is rejected whether or not the target exists.
/// assert!(root.resolve("../../etc/passwd").is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root(PathBuf);

impl Root {
    /// Creates a `Root` after validating the path.
    ///
    /// The path must exist and be a directory. It is canonicalized once;
    /// symlinks in the configured path are resolved here and the result is
    /// used as the anchor for every later check.
    ///
    /// # Errors
    ///
    /// Returns `BrowseError::InvalidRoot` if the path does not exist, is not
    /// a directory, or cannot be canonicalized.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let canonical = path.canonicalize().map_err(|e| BrowseError::InvalidRoot {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        if !canonical.is_dir() {
            return Err(BrowseError::InvalidRoot {
                path,
                reason: "not a directory".to_string(),
            });
        }

        Ok(Self(canonical))
    }

    /// Returns the canonical root path.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Base name of the root directory, or `"root"` for `/`.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.0
            .file_name()
            .map_or_else(|| "root".to_string(), |n| n.to_string_lossy().into_owned())
    }

    /// Returns `true` if `path` equals the root or lies beneath it.
    ///
    /// The comparison is component-wise, so `/data-other` is not inside
    /// `/data`. Only meaningful for canonical paths.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.0)
    }

    /// Resolves a caller-supplied relative path with default configuration.
    ///
    /// See [`Root::resolve_with`].
    pub fn resolve(&self, relative: &str) -> Result<ResolvedEntry> {
        self.resolve_with(relative, &BrowseConfig::default())
    }

    /// Resolves a caller-supplied relative path to a confined entry.
    ///
    /// # Resolution Steps
    ///
    /// 1. Reject NUL bytes
    /// 2. Split on `/` and `\`, dropping empty and `.` segments
    /// 3. Apply `..` lexically; popping above the root is an escape
    /// 4. Reject hidden segments when `show_hidden` is off
    /// 5. Canonicalize (resolves symlinks); failure means not found
    /// 6. Verify the canonical path is the root or lies beneath it, with no
    ///    hidden component below the root when `show_hidden` is off
    /// 7. Classify as directory or regular file; anything else is not found
    ///
    /// The confinement check in step 3 runs before any filesystem access, and
    /// step 6 runs on the canonical path only.
    ///
    /// # Errors
    ///
    /// Returns `BrowseError::PathRejected` for every failure. The reason is
    /// logged at debug level but never returned to the caller.
    pub fn resolve_with(&self, relative: &str, config: &BrowseConfig) -> Result<ResolvedEntry> {
        if relative.contains('\0') {
            debug!("rejected path containing NUL byte");
            return Err(BrowseError::PathRejected);
        }

        let Some(segments) = normalize_segments(relative) else {
            debug!(path = relative, "rejected path escaping root");
            return Err(BrowseError::PathRejected);
        };

        if segments.iter().any(|segment| config.hides(segment)) {
            debug!(path = relative, "rejected path through hidden entry");
            return Err(BrowseError::PathRejected);
        }

        let mut joined = self.0.clone();
        joined.extend(&segments);

        let canonical = match joined.canonicalize() {
            Ok(canonical) => canonical,
            Err(e) => {
                debug!(path = relative, error = %e, "rejected unresolvable path");
                return Err(BrowseError::PathRejected);
            }
        };

        if !self.contains(&canonical) {
            debug!(path = relative, "rejected path resolving outside root");
            return Err(BrowseError::PathRejected);
        }

        if !admits(&self.0, &canonical, config) {
            debug!(path = relative, "rejected path resolving to hidden entry");
            return Err(BrowseError::PathRejected);
        }

        let metadata = std::fs::metadata(&canonical).map_err(|e| {
            debug!(path = relative, error = %e, "rejected path without metadata");
            BrowseError::PathRejected
        })?;

        let kind = if metadata.is_dir() {
            EntryKind::Directory
        } else if metadata.is_file() {
            EntryKind::File
        } else {
            debug!(path = relative, "rejected special file");
            return Err(BrowseError::PathRejected);
        };

        Ok(ResolvedEntry::new(
            canonical,
            self.0.clone(),
            segments.join("/"),
            kind,
        ))
    }
}

/// Returns `true` if the canonical `path` lies under `root` and no component
/// below `root` is hidden by `config`.
pub(crate) fn admits(root: &Path, path: &Path, config: &BrowseConfig) -> bool {
    path.strip_prefix(root).is_ok_and(|below| {
        below
            .components()
            .all(|c| !config.hides(&c.as_os_str().to_string_lossy()))
    })
}

/// Splits a request path into normal segments, applying `.` and `..`.
///
/// Returns `None` if `..` would climb above the starting directory.
fn normalize_segments(relative: &str) -> Option<Vec<&str>> {
    let mut segments = Vec::new();
    for segment in relative.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            normal => segments.push(normal),
        }
    }
    Some(segments)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Root) {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("reports/2024/sub")).unwrap();
        fs::write(temp.path().join("reports/2024/a.txt"), "a").unwrap();
        fs::write(temp.path().join("reports/2024/sub/b.txt"), "b").unwrap();
        let root = Root::new(temp.path()).unwrap();
        (temp, root)
    }

    #[test]
    fn test_normalize_segments() {
        assert_eq!(normalize_segments(""), Some(vec![]));
        assert_eq!(normalize_segments("a/b"), Some(vec!["a", "b"]));
        assert_eq!(normalize_segments("a//b/"), Some(vec!["a", "b"]));
        assert_eq!(normalize_segments("a\\b"), Some(vec!["a", "b"]));
        assert_eq!(normalize_segments("./a/./b"), Some(vec!["a", "b"]));
        assert_eq!(normalize_segments("a/../b"), Some(vec!["b"]));
        assert_eq!(normalize_segments("/a/b"), Some(vec!["a", "b"]));
        assert_eq!(normalize_segments(".."), None);
        assert_eq!(normalize_segments("a/../../b"), None);
    }

    #[test]
    fn test_root_must_exist() {
        let temp = TempDir::new().unwrap();
        let result = Root::new(temp.path().join("missing"));
        assert!(matches!(result, Err(BrowseError::InvalidRoot { .. })));
    }

    #[test]
    fn test_root_must_be_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        let err = Root::new(file).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_root_is_canonical() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        let root = Root::new(temp.path().join("sub").join("..")).unwrap();
        assert_eq!(root.as_path(), temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_empty_path_resolves_to_root() {
        let (_temp, root) = setup();
        let entry = root.resolve("").unwrap();
        assert_eq!(entry.path(), root.as_path());
        assert_eq!(entry.kind(), EntryKind::Directory);
        assert!(entry.is_root());
    }

    #[test]
    fn test_resolve_directory_and_file() {
        let (_temp, root) = setup();

        let dir = root.resolve("reports/2024").unwrap();
        assert!(dir.is_dir());
        assert_eq!(dir.relative(), "reports/2024");
        assert_eq!(dir.path(), root.as_path().join("reports/2024"));

        let file = root.resolve("reports/2024/a.txt").unwrap();
        assert!(file.is_file());
    }

    #[test]
    fn test_separator_styles_normalize_identically() {
        let (_temp, root) = setup();
        let expected = root.resolve("reports/2024").unwrap();
        for variant in [
            "reports/2024/",
            "reports//2024",
            "reports\\2024",
            "./reports/2024",
            "/reports/2024",
            // `..` is applied lexically, so "reports/missing" never has to exist
            "reports/missing/../2024",
        ] {
            assert_eq!(root.resolve(variant).unwrap(), expected, "{variant}");
        }
    }

    #[test]
    fn test_traversal_rejected() {
        let (_temp, root) = setup();
        for path in ["..", "../", "../../etc/passwd", "reports/../../x", "..\\..\\windows"] {
            assert!(
                matches!(root.resolve(path), Err(BrowseError::PathRejected)),
                "{path} should be rejected"
            );
        }
    }

    #[test]
    fn test_nonexistent_rejected() {
        let (_temp, root) = setup();
        assert!(matches!(
            root.resolve("reports/2025"),
            Err(BrowseError::PathRejected)
        ));
    }

    #[test]
    fn test_nul_byte_rejected() {
        let (_temp, root) = setup();
        assert!(matches!(
            root.resolve("reports\0/2024"),
            Err(BrowseError::PathRejected)
        ));
    }

    #[test]
    fn test_sibling_with_common_prefix_is_outside() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("data")).unwrap();
        fs::create_dir(temp.path().join("data-other")).unwrap();
        let root = Root::new(temp.path().join("data")).unwrap();

        let sibling = temp.path().join("data-other").canonicalize().unwrap();
        assert!(!root.contains(&sibling));
        assert!(root.contains(root.as_path()));
    }

    #[test]
    fn test_hidden_segments_rejected_when_configured() {
        let (temp, root) = setup();
        fs::create_dir(temp.path().join(".secret")).unwrap();

        assert!(root.resolve(".secret").is_ok());

        let config = BrowseConfig::default().with_show_hidden(false);
        assert!(matches!(
            root.resolve_with(".secret", &config),
            Err(BrowseError::PathRejected)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_escaping_root_rejected() {
        use std::os::unix::fs::symlink;

        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("secret.txt"), "secret").unwrap();

        let (temp, root) = setup();
        symlink(outside.path(), temp.path().join("escape")).unwrap();
        symlink(
            outside.path().join("secret.txt"),
            temp.path().join("secret-link"),
        )
        .unwrap();

        assert!(matches!(
            root.resolve("escape"),
            Err(BrowseError::PathRejected)
        ));
        assert!(matches!(
            root.resolve("escape/secret.txt"),
            Err(BrowseError::PathRejected)
        ));
        assert!(matches!(
            root.resolve("secret-link"),
            Err(BrowseError::PathRejected)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_within_root_resolves_to_target() {
        use std::os::unix::fs::symlink;

        let (temp, root) = setup();
        symlink(
            temp.path().join("reports/2024"),
            temp.path().join("latest"),
        )
        .unwrap();

        let entry = root.resolve("latest").unwrap();
        assert!(entry.is_dir());
        assert_eq!(entry.relative(), "latest");
        assert_eq!(entry.path(), root.as_path().join("reports/2024"));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_rejected() {
        use std::os::unix::fs::symlink;

        let (temp, root) = setup();
        symlink(temp.path().join("gone"), temp.path().join("dangling")).unwrap();

        assert!(matches!(
            root.resolve("dangling"),
            Err(BrowseError::PathRejected)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_to_hidden_target_rejected_when_configured() {
        use std::os::unix::fs::symlink;

        let (temp, root) = setup();
        fs::create_dir(temp.path().join(".secret")).unwrap();
        fs::write(temp.path().join(".secret/key.pem"), "key").unwrap();
        symlink(temp.path().join(".secret"), temp.path().join("visible")).unwrap();

        assert!(root.resolve("visible/key.pem").is_ok());

        let config = BrowseConfig::default().with_show_hidden(false);
        for path in ["visible", "visible/key.pem"] {
            assert!(
                matches!(
                    root.resolve_with(path, &config),
                    Err(BrowseError::PathRejected)
                ),
                "{path} should be rejected"
            );
        }
    }

    #[test]
    fn test_admits_only_visible_paths_under_root() {
        let root = Path::new("/srv/.share");
        let hide = BrowseConfig::default().with_show_hidden(false);

        assert!(admits(root, Path::new("/srv/.share"), &hide));
        assert!(admits(root, Path::new("/srv/.share/a/b.txt"), &hide));
        assert!(!admits(root, Path::new("/srv/.share/.git/config"), &hide));
        assert!(!admits(root, Path::new("/srv/other"), &hide));
        assert!(admits(
            root,
            Path::new("/srv/.share/.git/config"),
            &BrowseConfig::default()
        ));
    }
}
