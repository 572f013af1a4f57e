//! Property-based tests for confinement and archive completeness.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use dirshare_core::ArchiveBuilder;
use dirshare_core::BrowseError;
use dirshare_core::Root;
use dirshare_core::sanitize_filename;
use dirshare_core::test_utils::tree_entries;
use dirshare_core::test_utils::zip_entries;
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

fn create_test_root() -> (TempDir, Root) {
    let temp = TempDir::new().expect("failed to create temp dir");
    let base = temp.path().join("base");
    fs::create_dir_all(base.join("inner")).expect("failed to create tree");
    fs::write(base.join("inner/file.txt"), "x").expect("failed to write file");
    let root = Root::new(&base).expect("failed to create root");
    (temp, root)
}

proptest! {
    /// More `..` segments than preceding names always escapes and is rejected.
    #[test]
    fn prop_escaping_traversal_rejected(
        names in prop::collection::vec("[a-z]{1,8}", 0..4),
        extra in 1usize..4,
        sep in prop::sample::select(vec!["/", "\\"]),
        tail in "[a-z]{0,8}",
    ) {
        let (_temp, root) = create_test_root();
        let mut segments: Vec<String> = names.clone();
        segments.extend(std::iter::repeat_n("..".to_string(), names.len() + extra));
        if !tail.is_empty() {
            segments.push(tail);
        }
        let request = segments.join(sep);

        let result = root.resolve(&request);
        prop_assert!(matches!(result, Err(BrowseError::PathRejected)), "{request} accepted");
    }

    /// Whatever resolves is inside the root.
    #[test]
    fn prop_resolved_entries_stay_inside_root(
        segments in prop::collection::vec(
            prop::sample::select(vec!["inner", "file.txt", "..", ".", "", "missing"]),
            0..6,
        ),
    ) {
        let (_temp, root) = create_test_root();
        let request = segments.join("/");
        if let Ok(entry) = root.resolve(&request) {
            prop_assert!(root.contains(entry.path()), "{request} escaped");
        }
    }

    /// Sanitized filenames are a single safe component.
    #[test]
    fn prop_sanitized_names_are_single_components(name in "\\PC{0,40}") {
        if let Some(clean) = sanitize_filename(&name) {
            prop_assert!(!clean.is_empty());
            prop_assert!(!clean.contains('/') && !clean.contains('\\'));
            prop_assert!(!clean.starts_with('.'));
            prop_assert!(clean.chars().all(|c| c.is_ascii_alphanumeric() || "_.-".contains(c)));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// The archive holds exactly the regular files of the tree, byte for byte.
    #[test]
    fn prop_archive_matches_tree(
        files in prop::collection::btree_map(
            "[a-z]{1,6}(/[a-z]{1,6}){0,2}\\.txt",
            prop::collection::vec(any::<u8>(), 0..256),
            0..12,
        ),
    ) {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("share");
        fs::create_dir(&dir).unwrap();
        for (name, content) in &files {
            let path = dir.join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, content).unwrap();
        }

        let root = Root::new(&dir).unwrap();
        let entry = root.resolve("").unwrap();
        let artifact = ArchiveBuilder::default().build(&entry).unwrap();

        prop_assert_eq!(zip_entries(artifact.into_file()), tree_entries(&dir));
    }
}
