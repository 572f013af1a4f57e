//! Directory listing for confined directories.

use crate::BrowseConfig;
use crate::BrowseError;
use crate::Result;
use crate::types::ResolvedEntry;
use crate::types::admits;
use std::cmp::Ordering;
use std::fs;
use tracing::debug;

/// Immediate children of a directory, split by kind.
///
/// Names are sorted case-insensitively for display. The order carries no
/// other meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    /// Names of immediate subdirectories.
    pub directories: Vec<String>,

    /// Names of immediate regular files.
    pub files: Vec<String>,
}

impl DirectoryListing {
    /// Returns `true` if the directory has no visible children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directories.is_empty() && self.files.is_empty()
    }

    /// Total number of listed entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.directories.len() + self.files.len()
    }
}

/// Lists the immediate subdirectories and regular files of `entry`.
///
/// Children are classified the way `stat` sees them, so a symlink to a
/// directory is listed as a directory. A symlink is listed only if its target
/// would itself resolve: inside the root and, when `config.show_hidden` is
/// off, not hidden. Anything that is neither a directory nor a regular file
/// (sockets, FIFOs, dangling symlinks) is omitted, as are hidden names when
/// `config.show_hidden` is off.
///
/// # Examples
///
/// ```no_run
/// use dirshare_core::BrowseConfig;
/// use dirshare_core::Root;
/// use dirshare_core::list_directory;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let root = Root::new("/srv/share")?;
/// let entry = root.resolve("")?;
/// let listing = list_directory(&entry, &BrowseConfig::default())?;
/// for dir in &listing.directories {
///     println!("{dir}/");
/// }
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns `NotADirectory` if `entry` is a file and `AccessFailure` if the
/// directory cannot be read.
pub fn list_directory(entry: &ResolvedEntry, config: &BrowseConfig) -> Result<DirectoryListing> {
    let dir = entry.require_directory()?;
    let mut listing = DirectoryListing::default();

    for child in fs::read_dir(dir.path()).map_err(BrowseError::access)? {
        let child = child.map_err(BrowseError::access)?;
        let name = child.file_name().to_string_lossy().into_owned();

        if config.hides(&name) {
            continue;
        }

        let is_link = child.file_type().is_ok_and(|t| t.is_symlink());
        if is_link
            && !fs::canonicalize(child.path())
                .is_ok_and(|target| admits(dir.root(), &target, config))
        {
            debug!(dir = dir.relative(), name = %name, "omitted link leaving the visible tree");
            continue;
        }

        // Follows symlinks; a dangling link has no metadata and is skipped.
        let Ok(metadata) = fs::metadata(child.path()) else {
            continue;
        };

        if metadata.is_dir() {
            listing.directories.push(name);
        } else if metadata.is_file() {
            listing.files.push(name);
        }
    }

    listing.directories.sort_by(|a, b| display_order(a, b));
    listing.files.sort_by(|a, b| display_order(a, b));

    Ok(listing)
}

/// Case-insensitive ordering with the exact name as tie-breaker.
fn display_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Root;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Root) {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("Zeta")).unwrap();
        fs::create_dir(temp.path().join("alpha")).unwrap();
        fs::create_dir(temp.path().join(".cache")).unwrap();
        fs::write(temp.path().join("b.txt"), "b").unwrap();
        fs::write(temp.path().join("A.txt"), "a").unwrap();
        fs::write(temp.path().join(".env"), "secret").unwrap();
        let root = Root::new(temp.path()).unwrap();
        (temp, root)
    }

    #[test]
    fn test_lists_directories_and_files_separately() {
        let (_temp, root) = setup();
        let entry = root.resolve("").unwrap();
        let listing = list_directory(&entry, &BrowseConfig::default()).unwrap();

        assert_eq!(listing.directories, vec![".cache", "alpha", "Zeta"]);
        assert_eq!(listing.files, vec![".env", "A.txt", "b.txt"]);
        assert_eq!(listing.len(), 6);
    }

    #[test]
    fn test_hidden_entries_omitted_when_configured() {
        let (_temp, root) = setup();
        let entry = root.resolve("").unwrap();
        let config = BrowseConfig::default().with_show_hidden(false);
        let listing = list_directory(&entry, &config).unwrap();

        assert_eq!(listing.directories, vec!["alpha", "Zeta"]);
        assert_eq!(listing.files, vec!["A.txt", "b.txt"]);
    }

    #[test]
    fn test_empty_directory() {
        let (_temp, root) = setup();
        let entry = root.resolve("alpha").unwrap();
        let listing = list_directory(&entry, &BrowseConfig::default()).unwrap();
        assert!(listing.is_empty());
    }

    #[test]
    fn test_listing_a_file_fails() {
        let (_temp, root) = setup();
        let entry = root.resolve("b.txt").unwrap();
        let result = list_directory(&entry, &BrowseConfig::default());
        assert!(matches!(result, Err(BrowseError::NotADirectory { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_classified_by_target() {
        use std::os::unix::fs::symlink;

        let (temp, root) = setup();
        symlink(temp.path().join("alpha"), temp.path().join("alpha-link")).unwrap();
        symlink(temp.path().join("b.txt"), temp.path().join("b-link.txt")).unwrap();
        symlink(temp.path().join("missing"), temp.path().join("dangling")).unwrap();

        let entry = root.resolve("").unwrap();
        let listing = list_directory(&entry, &BrowseConfig::default()).unwrap();

        assert!(listing.directories.contains(&"alpha-link".to_string()));
        assert!(listing.files.contains(&"b-link.txt".to_string()));
        assert!(!listing.directories.contains(&"dangling".to_string()));
        assert!(!listing.files.contains(&"dangling".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_leaving_root_are_omitted() {
        use std::os::unix::fs::symlink;

        let outside = TempDir::new().unwrap();
        fs::create_dir(outside.path().join("private")).unwrap();
        fs::write(outside.path().join("passwd"), "root:x").unwrap();

        let (temp, root) = setup();
        symlink(outside.path().join("private"), temp.path().join("out-dir")).unwrap();
        symlink(outside.path().join("passwd"), temp.path().join("out-file")).unwrap();

        let entry = root.resolve("").unwrap();
        let listing = list_directory(&entry, &BrowseConfig::default()).unwrap();

        assert!(!listing.directories.contains(&"out-dir".to_string()));
        assert!(!listing.files.contains(&"out-file".to_string()));
        assert_eq!(listing.directories, vec![".cache", "alpha", "Zeta"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_to_hidden_entry_omitted_when_configured() {
        use std::os::unix::fs::symlink;

        let (temp, root) = setup();
        symlink(temp.path().join(".cache"), temp.path().join("cache")).unwrap();
        let entry = root.resolve("").unwrap();

        let listing = list_directory(&entry, &BrowseConfig::default()).unwrap();
        assert!(listing.directories.contains(&"cache".to_string()));

        let config = BrowseConfig::default().with_show_hidden(false);
        let listing = list_directory(&entry, &config).unwrap();
        assert_eq!(listing.directories, vec!["alpha", "Zeta"]);
    }

    #[test]
    fn test_display_order() {
        assert_eq!(display_order("a", "B"), Ordering::Less);
        assert_eq!(display_order("B", "a"), Ordering::Greater);
        assert_eq!(display_order("A", "a"), Ordering::Less);
    }
}
