//! On-demand ZIP archives of confined directories.
//!
//! [`ArchiveBuilder`] walks a resolved directory and writes every regular
//! file below it into a ZIP held in anonymous temporary storage. The
//! resulting [`ArchiveArtifact`] can be streamed to a client and is removed
//! from disk when dropped.

mod builder;
mod progress;
mod report;
mod walker;

pub use builder::ArchiveArtifact;
pub use builder::ArchiveBuilder;
pub use progress::NoopProgress;
pub use progress::ProgressCallback;
pub use report::ArchiveReport;
pub use walker::ArchiveWalker;
pub use walker::WalkEntry;
pub use walker::collect_entries;
