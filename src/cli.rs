//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Compile an IPv4 CIDR list into a range table source file.
///
/// Everything except the config file location is set in the JSON config or
/// through `SLOW_IP_*` environment variables.
#[derive(Parser, Debug)]
#[command(name = "slow-ip-table")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON config file (or set SLOW_IP_CONFIG env var)
    #[arg(long, env = "SLOW_IP_CONFIG")]
    pub config: Option<PathBuf>,
}
