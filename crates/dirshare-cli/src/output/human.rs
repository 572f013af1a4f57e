//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use dirshare_core::ArchiveReport;
use dirshare_core::DirectoryListing;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (count, c) in s.chars().rev().enumerate() {
            if count > 0 && count % 3 == 0 {
                result.push(',');
            }
            result.push(c);
        }

        result.chars().rev().collect()
    }

    fn write_line(&self, line: &str) {
        let _ = self.term.write_line(line);
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_listing(&self, path: &str, listing: &DirectoryListing) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.verbose {
            self.write_line(&format!("/{path}"));
        }

        for dir in &listing.directories {
            if self.use_colors {
                self.write_line(&format!("{}/", style(dir).blue().bold()));
            } else {
                self.write_line(&format!("{dir}/"));
            }
        }
        for file in &listing.files {
            self.write_line(file);
        }

        if self.verbose {
            self.write_line("");
            self.write_line(&format!(
                "Total: {} directories, {} files",
                Self::format_number(listing.directories.len()),
                Self::format_number(listing.files.len())
            ));
        }

        Ok(())
    }

    fn format_archive_result(&self, output_path: &Path, report: &ArchiveReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            self.write_line(&format!(
                "{} Archive written: {}",
                style("✓").green().bold(),
                output_path.display()
            ));
        } else {
            self.write_line(&format!("Archive written: {}", output_path.display()));
        }

        self.write_line("");
        self.write_line(&format!(
            "  Files added:      {}",
            Self::format_number(report.files_added)
        ));
        self.write_line(&format!(
            "  Total size:       {}",
            Self::format_size(report.bytes_read)
        ));
        self.write_line(&format!(
            "  Archive size:     {}",
            Self::format_size(report.bytes_compressed)
        ));

        if report.entries_skipped > 0 {
            self.write_line(&format!("  Skipped:          {}", report.entries_skipped));
        }

        if self.verbose {
            self.write_line(&format!(
                "  Ratio:            {:.2}",
                report.compression_ratio()
            ));
            self.write_line(&format!("  Duration:         {:?}", report.duration));
        }

        if report.has_warnings() && self.verbose {
            self.write_line("");
            if self.use_colors {
                self.write_line(&format!("{}", style("Warnings:").yellow().bold()));
            } else {
                self.write_line("Warnings:");
            }
            for warning in &report.warnings {
                self.write_line(&format!("  - {warning}"));
            }
        }

        Ok(())
    }

    fn format_success(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            self.write_line(&format!("{} {message}", style("✓").green().bold()));
        } else {
            self.write_line(message);
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            self.write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            self.write_line(&format!("WARNING: {message}"));
        }
    }
}
