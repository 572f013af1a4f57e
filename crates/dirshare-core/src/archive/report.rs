//! Archive build reporting.

use std::time::Duration;

/// Statistics about a completed archive build.
///
/// # Examples
///
/// ```
/// use dirshare_core::ArchiveReport;
///
/// let mut report = ArchiveReport::default();
/// report.bytes_read = 1000;
/// report.bytes_compressed = 250;
/// assert_eq!(report.compression_ratio(), 4.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArchiveReport {
    /// Number of regular files added.
    pub files_added: usize,

    /// Number of entries skipped (symlinks, special files).
    pub entries_skipped: usize,

    /// Total source bytes read (uncompressed).
    pub bytes_read: u64,

    /// Size of the finished archive in bytes.
    pub bytes_compressed: u64,

    /// Wall-clock duration of the build.
    pub duration: Duration,

    /// Warnings generated during the build.
    pub warnings: Vec<String>,
}

impl ArchiveReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns the compression ratio (uncompressed / compressed).
    ///
    /// Returns 0.0 if either size is zero.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.bytes_compressed == 0 || self.bytes_read == 0 {
            return 0.0;
        }
        self.bytes_read as f64 / self.bytes_compressed as f64
    }
}
