//! Serve command implementation

use crate::cli::ServeArgs;
use crate::error::add_browse_context;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;
use dirshare_core::Root;
use dirshare_server::ServeConfig;
use dirshare_server::serve;

pub fn execute(args: &ServeArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let root_dir = args.browse.root_dir();
    let root = add_browse_context(Root::new(&root_dir), &root_dir, "")?;

    let config = ServeConfig::new(root.as_path())
        .with_bind(args.bind)
        .with_port(args.port)
        .with_max_upload_size(args.max_upload_size)
        .with_browse(args.browse.browse_config(args.compression_level));

    if !args.bind.is_loopback() {
        formatter.format_warning(&format!(
            "Listening on {}: anyone who can reach it can read and upload files",
            args.bind
        ));
    }
    formatter.format_success(&format!(
        "Serving {} on http://{}/",
        root.as_path().display(),
        config.socket_addr()
    ));

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?
        .block_on(serve(config))
}
