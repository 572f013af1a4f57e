//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use dirshare_core::ArchiveReport;
use dirshare_core::DirectoryListing;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct ListingOutput<'a> {
    path: String,
    directories: &'a [String],
    files: &'a [String],
}

#[derive(Serialize)]
struct ArchiveOutput<'a> {
    output_path: String,
    files_added: usize,
    entries_skipped: usize,
    bytes_read: u64,
    bytes_compressed: u64,
    compression_ratio: f64,
    duration_ms: u128,
    warnings: &'a [String],
}

impl OutputFormatter for JsonFormatter {
    fn format_listing(&self, path: &str, listing: &DirectoryListing) -> Result<()> {
        let data = ListingOutput {
            path: format!("/{path}"),
            directories: &listing.directories,
            files: &listing.files,
        };
        Self::output(&JsonOutput::success("ls", data))
    }

    fn format_archive_result(&self, output_path: &Path, report: &ArchiveReport) -> Result<()> {
        let data = ArchiveOutput {
            output_path: output_path.display().to_string(),
            files_added: report.files_added,
            entries_skipped: report.entries_skipped,
            bytes_read: report.bytes_read,
            bytes_compressed: report.bytes_compressed,
            compression_ratio: report.compression_ratio(),
            duration_ms: report.duration.as_millis(),
            warnings: &report.warnings,
        };
        Self::output(&JsonOutput::success("archive", data))
    }

    fn format_success(&self, message: &str) {
        #[derive(Serialize)]
        struct SuccessData<'a> {
            message: &'a str,
        }

        let _ = Self::output(&JsonOutput::success("message", SuccessData { message }));
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData<'a> {
            message: &'a str,
        }

        let _ = Self::output(&JsonOutput::success("warning", WarningData { message }));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_output_structure() {
        let listing = DirectoryListing {
            directories: vec!["2024".into()],
            files: vec!["summary.txt".into()],
        };
        let data = ListingOutput {
            path: "/reports".into(),
            directories: &listing.directories,
            files: &listing.files,
        };

        let json = serde_json::to_value(JsonOutput::success("ls", data)).unwrap();
        assert_eq!(json["operation"], "ls");
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["path"], "/reports");
        assert_eq!(json["data"]["directories"][0], "2024");
        assert_eq!(json["data"]["files"][0], "summary.txt");
    }
}
