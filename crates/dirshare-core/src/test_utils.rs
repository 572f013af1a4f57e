//! Test utilities for building fixture trees and reading archives back.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::io::Seek;
use std::path::Path;

/// Creates files under `root` from a list of (relative path, content).
///
/// Parent directories are created as needed. A path ending in `/` creates
/// an empty directory.
///
/// # Examples
///
/// ```
/// use dirshare_core::test_utils::create_tree;
///
/// let temp = tempfile::tempdir().unwrap();
/// create_tree(temp.path(), &[("docs/a.txt", b"alpha"), ("empty/", b"")]);
/// assert!(temp.path().join("docs/a.txt").is_file());
/// assert!(temp.path().join("empty").is_dir());
/// ```
pub fn create_tree(root: &Path, entries: &[(&str, &[u8])]) {
    for (path, content) in entries {
        let target = root.join(path);
        if path.ends_with('/') {
            fs::create_dir_all(&target).unwrap();
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&target, content).unwrap();
    }
}

/// Reads every entry of a ZIP into a name → content map.
#[must_use]
pub fn zip_entries<R: Read + Seek>(reader: R) -> BTreeMap<String, Vec<u8>> {
    let mut archive = zip::ZipArchive::new(reader).unwrap();
    let mut entries = BTreeMap::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).unwrap();
        let mut data = Vec::new();
        entry.read_to_end(&mut data).unwrap();
        entries.insert(entry.name().to_string(), data);
    }
    entries
}

/// Reads every regular file below `dir` into a `/`-separated name → content
/// map, without following symlinks.
#[must_use]
pub fn tree_entries(dir: &Path) -> BTreeMap<String, Vec<u8>> {
    walkdir::WalkDir::new(dir)
        .min_depth(1)
        .into_iter()
        .map(Result::unwrap)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let name = e
                .path()
                .strip_prefix(dir)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            (name, fs::read(e.path()).unwrap())
        })
        .collect()
}
