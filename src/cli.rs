use clap::Parser;
use std::path::PathBuf;

/// wsl-reclaim - Reclaim disk space from WSL2 distribution disk images
///
/// The flow is interactive: pick a distribution, optionally analyze what is
/// using space inside it, optionally trim, then compact its backing image.
#[derive(Parser, Debug)]
#[command(name = "wsl-reclaim")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,

    /// Distribution to reclaim, skipping the selection menu
    #[arg(short, long, value_name = "NAME")]
    pub distro: Option<String>,

    /// Analysis threshold in MB (overrides configuration)
    #[arg(short, long, value_name = "MB", value_parser = clap::value_parser!(u64).range(1..))]
    pub threshold: Option<u64>,

    /// Emit the analysis report as JSON instead of a tree
    #[arg(long)]
    pub json: bool,
}
