//! ZIP archive construction for confined directories.

use crate::BrowseConfig;
use crate::BrowseError;
use crate::Result;
use crate::archive::progress::NoopProgress;
use crate::archive::progress::ProgressCallback;
use crate::archive::progress::ProgressTracker;
use crate::archive::report::ArchiveReport;
use crate::archive::walker::WalkEntry;
use crate::archive::walker::collect_entries;
use crate::types::ResolvedEntry;
use std::fs::File;
use std::io;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::debug;
use tracing::warn;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Copy buffer size for streaming file contents into the archive.
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Entries at or above this size need ZIP64 extensions.
const ZIP64_THRESHOLD: u64 = 0xFFFF_FFFF;

/// Builds ZIP archives of confined directories.
///
/// Archives are written to an unnamed temporary file. The operating system
/// removes it as soon as the last handle is closed, so a failed build, a
/// dropped artifact, or an interrupted download never leaves data behind.
///
/// # Examples
///
/// ```no_run
/// use dirshare_core::ArchiveBuilder;
/// use dirshare_core::BrowseConfig;
/// use dirshare_core::Root;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let root = Root::new("/srv/share")?;
/// let dir = root.resolve("reports/2024")?;
///
/// let artifact = ArchiveBuilder::new(BrowseConfig::default()).build(&dir)?;
/// assert_eq!(artifact.file_name(), "2024.zip");
/// println!("{} files, {} bytes", artifact.report().files_added, artifact.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArchiveBuilder {
    config: BrowseConfig,
}

impl ArchiveBuilder {
    /// Creates a builder with the given configuration.
    #[must_use]
    pub fn new(config: BrowseConfig) -> Self {
        Self { config }
    }

    /// Returns the builder configuration.
    #[must_use]
    pub fn config(&self) -> &BrowseConfig {
        &self.config
    }

    /// Builds an archive of `dir` without progress reporting.
    ///
    /// # Errors
    ///
    /// See [`ArchiveBuilder::build_with_progress`].
    pub fn build(&self, dir: &ResolvedEntry) -> Result<ArchiveArtifact> {
        self.build_with_progress(dir, &mut NoopProgress)
    }

    /// Builds an archive of `dir`, reporting progress per file.
    ///
    /// `dir` has already passed confinement, so it is not checked again
    /// here. Every regular file below it becomes one entry named by its
    /// path relative to `dir`; empty directories are not represented.
    ///
    /// # Errors
    ///
    /// - `NotADirectory` if `dir` is a file
    /// - `InvalidConfig` if the compression level is out of range
    /// - `ArchiveBuildFailure` on any I/O error while walking, reading or
    ///   writing; the partial archive is discarded
    pub fn build_with_progress(
        &self,
        dir: &ResolvedEntry,
        progress: &mut dyn ProgressCallback,
    ) -> Result<ArchiveArtifact> {
        let dir = dir.require_directory()?;
        self.config.validate()?;

        let start = Instant::now();
        let temp = tempfile::tempfile().map_err(BrowseError::archive)?;

        let (file, mut report) = write_archive(temp, dir.path(), &self.config, progress)
            .map_err(|e| {
                warn!(dir = dir.relative(), error = %e, "archive build failed");
                BrowseError::archive(e)
            })?;

        report.duration = start.elapsed();
        debug!(
            dir = dir.relative(),
            files = report.files_added,
            skipped = report.entries_skipped,
            bytes = report.bytes_compressed,
            "archive built"
        );

        Ok(ArchiveArtifact {
            file,
            file_name: dir.archive_name(),
            len: report.bytes_compressed,
            report,
        })
    }
}

/// A finished archive held in anonymous temporary storage.
///
/// The backing file is deleted when the artifact (or the `File` obtained
/// from [`ArchiveArtifact::into_file`]) is dropped.
#[derive(Debug)]
pub struct ArchiveArtifact {
    file: File,
    file_name: String,
    len: u64,
    report: ArchiveReport,
}

impl ArchiveArtifact {
    /// Attachment name, `<dirBaseName>.zip`.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Size of the archive in bytes.
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.len
    }

    /// Returns `true` if the archive has no bytes (never the case for a
    /// finished ZIP).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Build statistics.
    #[must_use]
    pub const fn report(&self) -> &ArchiveReport {
        &self.report
    }

    /// Returns the backing file, positioned at the start of the archive.
    #[must_use]
    pub fn into_file(self) -> File {
        self.file
    }
}

impl Read for ArchiveArtifact {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

/// Writes every walked file into a ZIP on `file` and rewinds it.
fn write_archive(
    file: File,
    dir: &Path,
    config: &BrowseConfig,
    progress: &mut dyn ProgressCallback,
) -> io::Result<(File, ArchiveReport)> {
    let entries = collect_entries(dir, config)?;
    let total = entries
        .iter()
        .filter(|e| matches!(e, WalkEntry::File { .. }))
        .count();

    let mut zip = ZipWriter::new(file);
    let mut report = ArchiveReport::new();
    let mut tracker = ProgressTracker::new(progress, total);
    let options = file_options(config.compression_level);
    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];

    for entry in &entries {
        match entry {
            WalkEntry::File { path, name, size } => {
                tracker.on_entry_start(Path::new(name));
                let bytes =
                    add_file(&mut zip, path, name, *size, options, &mut buffer, &mut tracker)?;
                report.files_added += 1;
                report.bytes_read += bytes;
                tracker.on_entry_complete(Path::new(name));
            }
            WalkEntry::Skipped { name } => {
                report.entries_skipped += 1;
                report.add_warning(format!("skipped non-regular file: {name}"));
            }
        }
    }

    let mut file = zip
        .finish()
        .map_err(|e| io::Error::other(format!("failed to finish ZIP archive: {e}")))?;

    report.bytes_compressed = file.seek(SeekFrom::End(0))?;
    file.rewind()?;
    tracker.on_complete();

    Ok((file, report))
}

/// Entry options for the configured compression level.
fn file_options(level: Option<u8>) -> SimpleFileOptions {
    match level {
        Some(0) => SimpleFileOptions::default().compression_method(CompressionMethod::Stored),
        level => SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(level.map(i64::from)),
    }
}

/// Streams one file into the archive and returns the bytes copied.
fn add_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    path: &Path,
    name: &str,
    size: u64,
    options: SimpleFileOptions,
    buffer: &mut [u8],
    tracker: &mut ProgressTracker<'_>,
) -> io::Result<u64> {
    let mut source = File::open(path)?;

    let options = options.large_file(size >= ZIP64_THRESHOLD);
    #[cfg(unix)]
    let options = {
        use std::os::unix::fs::PermissionsExt;
        options.unix_permissions(source.metadata()?.permissions().mode())
    };

    zip.start_file(name, options)
        .map_err(|e| io::Error::other(format!("failed to start {name} in ZIP: {e}")))?;

    let mut copied = 0u64;
    loop {
        let read = source.read(buffer)?;
        if read == 0 {
            break;
        }
        zip.write_all(&buffer[..read])?;
        copied += read as u64;
        tracker.on_bytes_read(read as u64);
    }

    Ok(copied)
}
