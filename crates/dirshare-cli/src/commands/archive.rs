//! Archive command implementation

use crate::cli::ArchiveArgs;
use crate::error::add_browse_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use dirshare_core::ArchiveBuilder;
use dirshare_core::NoopProgress;
use dirshare_core::Root;
use std::fs::File;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use tracing::info;

pub fn execute(args: &ArchiveArgs, formatter: &dyn OutputFormatter, quiet: bool) -> Result<()> {
    let root_dir = args.browse.root_dir();
    let config = args.browse.browse_config(args.compression_level);

    let root = add_browse_context(Root::new(&root_dir), &root_dir, &args.path)?;
    let entry = add_browse_context(root.resolve_with(&args.path, &config), &root_dir, &args.path)?;
    let dir = add_browse_context(entry.require_directory(), &root_dir, &args.path)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(dir.archive_name()));

    if output.exists() {
        if !args.force {
            bail!(
                "Output file '{}' already exists\n\
                 HINT: Use --force to overwrite.",
                output.display()
            );
        }
        formatter.format_warning(&format!("Overwriting {}", output.display()));
    }

    let builder = ArchiveBuilder::new(config);
    let artifact = if !quiet && CliProgress::should_show() {
        let mut progress = CliProgress::new("Archiving");
        builder.build_with_progress(dir, &mut progress)
    } else {
        builder.build_with_progress(dir, &mut NoopProgress)
    };
    let artifact = add_browse_context(artifact, &root_dir, &args.path)?;
    let report = artifact.report().clone();

    write_output(artifact.into_file(), &output)?;

    info!(
        dir = dir.relative(),
        output = %output.display(),
        files = report.files_added,
        "archive written"
    );

    formatter.format_archive_result(&output, &report)
}

/// Copies the finished archive next to `output` and renames it into place,
/// so a failed copy never leaves a truncated archive at `output`.
fn write_output(mut source: File, output: &Path) -> Result<()> {
    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create '{}'", output.display()))?;
    io::copy(&mut source, &mut staged)
        .with_context(|| format!("Failed to write '{}'", output.display()))?;
    staged
        .persist(output)
        .with_context(|| format!("Failed to write '{}'", output.display()))?;
    Ok(())
}
