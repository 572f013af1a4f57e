//! Root-confined browsing, archiving and upload handling.
//!
//! `dirshare-core` is the filesystem side of a small web file browser. Every
//! client-supplied path goes through [`Root::resolve`], which either returns
//! a [`ResolvedEntry`] guaranteed to lie inside the root or fails with the
//! opaque [`BrowseError::PathRejected`]. Listings, archives and uploads only
//! accept resolved entries.
//!
//! # Examples
//!
//! ```no_run
//! use dirshare_core::ArchiveBuilder;
//! use dirshare_core::BrowseConfig;
//! use dirshare_core::Root;
//! use dirshare_core::list_directory;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BrowseConfig::default();
//! let root = Root::new("/srv/share")?;
//!
//! let dir = root.resolve_with("reports", &config)?;
//! let listing = list_directory(&dir, &config)?;
//! println!("{} entries", listing.len());
//!
//! let artifact = ArchiveBuilder::new(config).build(&dir)?;
//! println!("{} is {} bytes", artifact.file_name(), artifact.len());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod archive;
pub mod config;
pub mod delivery;
pub mod error;
pub mod listing;
#[doc(hidden)]
pub mod test_utils;
pub mod types;
pub mod upload;

// Re-export main API types
pub use archive::ArchiveArtifact;
pub use archive::ArchiveBuilder;
pub use archive::ArchiveReport;
pub use archive::NoopProgress;
pub use archive::ProgressCallback;
pub use config::BrowseConfig;
pub use delivery::Disposition;
pub use delivery::disposition_for;
pub use error::BrowseError;
pub use error::Result;
pub use error::UploadRejection;
pub use listing::DirectoryListing;
pub use listing::list_directory;
pub use upload::sanitize_filename;
pub use upload::write_uploaded_file;

pub use types::EntryKind;
pub use types::ResolvedEntry;
pub use types::Root;
