//! Directory traversal for archive building.
//!
//! The walker never follows symlinks. Only regular files become archive
//! entries; symlinks and special files are reported as skipped, and
//! directories are traversed but never emitted.

use crate::BrowseConfig;
use std::io;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// An item found while walking the directory to archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkEntry {
    /// A regular file to add.
    File {
        /// Filesystem path of the file.
        path: PathBuf,
        /// `/`-separated entry name relative to the archived directory.
        name: String,
        /// Size in bytes at walk time.
        size: u64,
    },

    /// An entry that will not be archived (symlink, socket, FIFO, device).
    Skipped {
        /// `/`-separated name relative to the archived directory.
        name: String,
    },
}

impl WalkEntry {
    /// Entry name relative to the archived directory.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Skipped { name } => name,
        }
    }
}

/// Walks a directory tree yielding files to archive.
///
/// # Examples
///
/// ```no_run
/// use dirshare_core::BrowseConfig;
/// use dirshare_core::archive::ArchiveWalker;
/// use std::path::Path;
///
/// let config = BrowseConfig::default();
/// let walker = ArchiveWalker::new(Path::new("/srv/share/reports"), &config);
/// for entry in walker.walk() {
///     println!("{}", entry?.name());
/// }
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct ArchiveWalker<'a> {
    root: &'a Path,
    config: &'a BrowseConfig,
}

impl<'a> ArchiveWalker<'a> {
    /// Creates a walker rooted at `root`.
    #[must_use]
    pub fn new(root: &'a Path, config: &'a BrowseConfig) -> Self {
        Self { root, config }
    }

    /// Returns an iterator over files and skipped entries below the root.
    ///
    /// Hidden subtrees are pruned when `show_hidden` is off. The root itself
    /// is never yielded.
    ///
    /// # Errors
    ///
    /// Items are `Err` when a directory cannot be read or an entry's
    /// metadata cannot be obtained.
    pub fn walk(&self) -> impl Iterator<Item = io::Result<WalkEntry>> + '_ {
        WalkDir::new(self.root)
            .follow_links(false)
            .min_depth(1)
            .into_iter()
            .filter_entry(move |entry| {
                !self
                    .config
                    .hides(&entry.file_name().to_string_lossy())
            })
            .filter_map(move |entry| match entry {
                Ok(entry) => self.classify(&entry).transpose(),
                Err(e) => Some(Err(io::Error::from(e))),
            })
    }

    /// Turns a walkdir entry into a `WalkEntry`; directories yield `None`.
    fn classify(&self, entry: &walkdir::DirEntry) -> io::Result<Option<WalkEntry>> {
        let file_type = entry.file_type();
        if file_type.is_dir() {
            return Ok(None);
        }

        let name = entry_name(entry.path(), self.root)?;

        if file_type.is_file() {
            let size = entry.metadata().map_err(io::Error::from)?.len();
            Ok(Some(WalkEntry::File {
                path: entry.path().to_path_buf(),
                name,
                size,
            }))
        } else {
            Ok(Some(WalkEntry::Skipped { name }))
        }
    }
}

/// Collects every entry in a single traversal.
///
/// # Errors
///
/// Returns the first traversal error encountered.
pub fn collect_entries(root: &Path, config: &BrowseConfig) -> io::Result<Vec<WalkEntry>> {
    ArchiveWalker::new(root, config).walk().collect()
}

/// Computes the `/`-separated archive name of `path` relative to `root`.
///
/// Only normal components are kept, so the name can never reference
/// anything above `root`.
fn entry_name(path: &Path, root: &Path) -> io::Result<String> {
    let relative = path.strip_prefix(root).map_err(|_| {
        io::Error::other(format!(
            "walked entry {} is outside {}",
            path.display(),
            root.display()
        ))
    })?;

    let parts: Vec<_> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();

    Ok(parts.join("/"))
}
