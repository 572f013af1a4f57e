//! Progress reporting for archive builds.

use std::path::Path;

/// Callback trait for progress reporting while an archive is built.
///
/// The trait requires `Send` so a build can run on a blocking worker thread.
///
/// # Examples
///
/// ```
/// use dirshare_core::ProgressCallback;
/// use std::path::Path;
///
/// struct PrintProgress;
///
/// impl ProgressCallback for PrintProgress {
///     fn on_entry_start(&mut self, path: &Path, total: usize, current: usize) {
///         println!("[{current}/{total}] {}", path.display());
///     }
///
///     fn on_bytes_read(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, _path: &Path) {}
///
///     fn on_complete(&mut self) {
///         println!("done");
///     }
/// }
/// ```
pub trait ProgressCallback: Send {
    /// Called before a file is added.
    ///
    /// # Arguments
    ///
    /// * `path` - Entry name inside the archive
    /// * `total` - Total number of files that will be added
    /// * `current` - Current file number (1-indexed)
    fn on_entry_start(&mut self, path: &Path, total: usize, current: usize);

    /// Called for each chunk of source bytes copied into the archive.
    fn on_bytes_read(&mut self, bytes: u64);

    /// Called after a file has been fully added.
    fn on_entry_complete(&mut self, path: &Path);

    /// Called once after the archive has been finalized.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

    fn on_bytes_read(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_complete(&mut self) {}
}

/// Wraps a callback and numbers entries as they start.
pub(crate) struct ProgressTracker<'a> {
    progress: &'a mut dyn ProgressCallback,
    current: usize,
    total: usize,
}

impl<'a> ProgressTracker<'a> {
    pub(crate) fn new(progress: &'a mut dyn ProgressCallback, total: usize) -> Self {
        Self {
            progress,
            current: 0,
            total,
        }
    }

    pub(crate) fn on_entry_start(&mut self, path: &Path) {
        self.current += 1;
        self.progress.on_entry_start(path, self.total, self.current);
    }

    pub(crate) fn on_bytes_read(&mut self, bytes: u64) {
        self.progress.on_bytes_read(bytes);
    }

    pub(crate) fn on_entry_complete(&mut self, path: &Path) {
        self.progress.on_entry_complete(path);
    }

    pub(crate) fn on_complete(&mut self) {
        self.progress.on_complete();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        starts: Vec<(String, usize, usize)>,
        bytes: u64,
        completed: bool,
    }

    impl ProgressCallback for Recorder {
        fn on_entry_start(&mut self, path: &Path, total: usize, current: usize) {
            self.starts
                .push((path.display().to_string(), total, current));
        }

        fn on_bytes_read(&mut self, bytes: u64) {
            self.bytes += bytes;
        }

        fn on_entry_complete(&mut self, _path: &Path) {}

        fn on_complete(&mut self) {
            self.completed = true;
        }
    }

    #[test]
    fn test_tracker_numbers_entries() {
        let mut recorder = Recorder::default();
        {
            let mut tracker = ProgressTracker::new(&mut recorder, 2);
            tracker.on_entry_start(Path::new("a.txt"));
            tracker.on_bytes_read(10);
            tracker.on_entry_complete(Path::new("a.txt"));
            tracker.on_entry_start(Path::new("b.txt"));
            tracker.on_bytes_read(5);
            tracker.on_complete();
        }

        assert_eq!(
            recorder.starts,
            vec![("a.txt".to_string(), 2, 1), ("b.txt".to_string(), 2, 2)]
        );
        assert_eq!(recorder.bytes, 15);
        assert!(recorder.completed);
    }
}
