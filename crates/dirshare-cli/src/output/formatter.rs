//! Output formatter trait for CLI results.

use anyhow::Result;
use dirshare_core::ArchiveReport;
use dirshare_core::DirectoryListing;
use serde::Serialize;
use std::path::Path;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format a directory listing
    fn format_listing(&self, path: &str, listing: &DirectoryListing) -> Result<()>;

    /// Format the result of writing an archive
    fn format_archive_result(&self, output_path: &Path, report: &ArchiveReport) -> Result<()>;

    /// Format success message
    fn format_success(&self, message: &str);

    /// Format warning message
    fn format_warning(&self, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
        }
    }
}
