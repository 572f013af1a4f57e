//! Error types for path resolution, listing, archival and uploads.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `BrowseError`.
pub type Result<T> = std::result::Result<T, BrowseError>;

/// Reason an upload was refused.
#[derive(Error, Debug)]
pub enum UploadRejection {
    /// The request carried no file part.
    #[error("no file supplied")]
    MissingFile,

    /// The client supplied an empty filename.
    #[error("empty filename")]
    EmptyFilename,

    /// Sanitizing the filename left nothing usable.
    #[error("filename is not safe to store")]
    UnsafeFilename,

    /// Writing the file to disk failed.
    #[error("failed to store file: {0}")]
    WriteFailed(#[source] std::io::Error),
}

/// Errors that can occur while browsing, archiving or uploading.
///
/// Display strings never contain absolute filesystem paths: only the
/// caller-supplied relative path is ever echoed back.
#[derive(Error, Debug)]
pub enum BrowseError {
    /// The requested path escapes the root or does not exist.
    ///
    /// Both cases share this variant so callers cannot probe the filesystem
    /// layout outside the root.
    #[error("path not found")]
    PathRejected,

    /// A directory was required but the path names a file.
    #[error("not a directory: /{path}")]
    NotADirectory {
        /// Relative path that was requested.
        path: String,
    },

    /// A file was required but the path names a directory.
    #[error("not a file: /{path}")]
    NotAFile {
        /// Relative path that was requested.
        path: String,
    },

    /// I/O failure while walking or compressing a directory.
    #[error("failed to build archive: {source}")]
    ArchiveBuildFailure {
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An upload was refused.
    #[error("upload rejected: {reason}")]
    UploadRejected {
        /// Why the upload was refused.
        #[source]
        reason: UploadRejection,
    },

    /// Reading directory contents or metadata failed.
    #[error("filesystem access failed: {source}")]
    AccessFailure {
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configured root directory is unusable.
    #[error("invalid root directory {}: {reason}", path.display())]
    InvalidRoot {
        /// Path given as the root.
        path: PathBuf,
        /// What is wrong with it.
        reason: String,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        reason: String,
    },
}

impl BrowseError {
    /// Wraps an I/O error raised during archive construction.
    pub(crate) const fn archive(source: std::io::Error) -> Self {
        Self::ArchiveBuildFailure { source }
    }

    /// Wraps an I/O error raised while reading the filesystem.
    pub(crate) const fn access(source: std::io::Error) -> Self {
        Self::AccessFailure { source }
    }

    /// Builds an `UploadRejected` error.
    pub(crate) const fn upload(reason: UploadRejection) -> Self {
        Self::UploadRejected { reason }
    }

    /// Returns `true` if the error should be reported as a generic
    /// "not found" condition.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirshare_core::BrowseError;
    ///
    /// assert!(BrowseError::PathRejected.is_not_found());
    /// assert!(BrowseError::NotADirectory { path: "a.txt".into() }.is_not_found());
    /// ```
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PathRejected | Self::NotADirectory { .. } | Self::NotAFile { .. }
        )
    }

    /// Returns `true` if the request itself was at fault.
    ///
    /// Upload rejections caused by the client's input count as client
    /// errors; a failed write does not.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        match self {
            Self::UploadRejected { reason } => !matches!(reason, UploadRejection::WriteFailed(_)),
            _ => self.is_not_found(),
        }
    }

    /// Returns `true` if the error is a server-side failure.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        !self.is_client_error()
    }

    /// Returns the upload rejection reason, if applicable.
    #[must_use]
    pub const fn upload_rejection(&self) -> Option<&UploadRejection> {
        match self {
            Self::UploadRejected { reason } => Some(reason),
            _ => None,
        }
    }
}
