//! List command implementation

use crate::cli::LsArgs;
use crate::error::add_browse_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use dirshare_core::Root;
use dirshare_core::list_directory;

pub fn execute(args: &LsArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let root_dir = args.browse.root_dir();
    let config = args.browse.browse_config(dirshare_core::config::DEFAULT_COMPRESSION_LEVEL);

    let root = add_browse_context(Root::new(&root_dir), &root_dir, &args.path)?;
    let entry = add_browse_context(root.resolve_with(&args.path, &config), &root_dir, &args.path)?;
    let listing = add_browse_context(list_directory(&entry, &config), &root_dir, &args.path)?;

    formatter.format_listing(entry.relative(), &listing)
}
