//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use dirshare_core::BrowseConfig;
use dirshare_core::config::DEFAULT_COMPRESSION_LEVEL;
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dirshare")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Log filter directive (RUST_LOG takes precedence)
    #[arg(long, global = true, default_value = "info", value_name = "FILTER")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve a directory over HTTP
    Serve(ServeArgs),
    /// List a directory inside the root
    Ls(LsArgs),
    /// Write a ZIP archive of a directory inside the root
    Archive(ArchiveArgs),
    /// Generate shell completion scripts
    Completion(CompletionArgs),
}

/// Options shared by every command that reads the root.
#[derive(clap::Args)]
pub struct BrowseArgs {
    /// Directory to expose (default: current directory)
    #[arg(long, env = "DIRSHARE_ROOT", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Hide entries whose name starts with '.'
    #[arg(long)]
    pub hide_hidden: bool,
}

impl BrowseArgs {
    /// The root directory, defaulting to the working directory.
    pub fn root_dir(&self) -> PathBuf {
        self.root.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Browsing configuration with the given compression level.
    pub fn browse_config(&self, compression_level: u8) -> BrowseConfig {
        BrowseConfig::default()
            .with_show_hidden(!self.hide_hidden)
            .with_compression_level(Some(compression_level))
    }
}

#[derive(clap::Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub browse: BrowseArgs,

    /// Address to listen on
    #[arg(short, long, env = "DIRSHARE_BIND", default_value = "127.0.0.1")]
    pub bind: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "DIRSHARE_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Largest accepted upload (suffixes K, M, G, T)
    #[arg(long, default_value = "100M", value_parser = parse_byte_size)]
    pub max_upload_size: u64,

    /// Compression level for folder archives (0 stores)
    #[arg(short = 'l', long, default_value_t = DEFAULT_COMPRESSION_LEVEL,
          value_parser = clap::value_parser!(u8).range(0..=9))]
    pub compression_level: u8,
}

#[derive(clap::Args)]
pub struct LsArgs {
    #[command(flatten)]
    pub browse: BrowseArgs,

    /// Path relative to the root
    #[arg(value_name = "PATH", default_value = "")]
    pub path: String,
}

#[derive(clap::Args)]
pub struct ArchiveArgs {
    #[command(flatten)]
    pub browse: BrowseArgs,

    /// Directory relative to the root
    #[arg(value_name = "PATH", default_value = "")]
    pub path: String,

    /// Output file (default: ./<name>.zip)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Compression level (0 stores)
    #[arg(short = 'l', long, default_value_t = DEFAULT_COMPRESSION_LEVEL,
          value_parser = clap::value_parser!(u8).range(0..=9))]
    pub compression_level: u8,

    /// Overwrite output file if exists
    #[arg(short = 'f', long)]
    pub force: bool,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Parse byte size with optional suffix (K, M, G, T)
#[allow(clippy::option_if_let_else)]
fn parse_byte_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty byte size".to_string());
    }

    let (num_str, multiplier) = if let Some(stripped) = s.strip_suffix('T') {
        (stripped, 1024_u64.pow(4))
    } else if let Some(stripped) = s.strip_suffix('G') {
        (stripped, 1024_u64.pow(3))
    } else if let Some(stripped) = s.strip_suffix('M') {
        (stripped, 1024_u64.pow(2))
    } else if let Some(stripped) = s.strip_suffix('K') {
        (stripped, 1024)
    } else {
        (s, 1)
    };

    num_str
        .parse::<u64>()
        .map_err(|_| format!("invalid byte size: {s}"))
        .and_then(|n| {
            n.checked_mul(multiplier)
                .ok_or_else(|| format!("byte size overflow: {s}"))
        })
        .and_then(|n| {
            if n == 0 {
                Err("byte size must be greater than zero".to_string())
            } else {
                Ok(n)
            }
        })
}
