//! CLI arguments for the aslc binary.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "aslc", version, about = "ASL compiler - three-address code backend")]
pub struct CliArgs {
    /// ASL source file to compile.
    pub input: PathBuf,

    /// Print diagnostics as JSON, one object per line.
    #[arg(long)]
    pub json: bool,

    /// Suppress the trailing error count.
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short, long)]
    pub verbose: bool,
}
