use clap::Parser;
use std::path::PathBuf;

/// Scan Office documents for the Follina (ms-msdt) remote-template exploit.
///
/// Every FILE that is a zip container has its relationship manifests
/// searched for an external `.html` template. The template is fetched once
/// and checked for the `ms-msdt` protocol handler.
#[derive(Debug, Parser)]
#[command(name = "follina-scanner", version, override_usage = "follina-scanner [OPTION]... [FILE]...")]
pub struct Args {
    /// Files or directories to scan
    #[arg(value_name = "FILE")]
    pub paths: Vec<PathBuf>,

    /// Recursively scan files in a directory
    #[arg(short, long, short_alias = 'R')]
    pub recursive: bool,

    /// Display everything that's happening
    #[arg(short, long)]
    pub verbose: bool,

    /// Read configuration from this file instead of the default location
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Only inspect `word/_rels/document.xml.rels` (Word documents)
    #[arg(long)]
    pub strict: bool,

    /// Seconds to wait for an external template before giving up
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
}
