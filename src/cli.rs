use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// In-memory kanban task board.
/// Nothing is saved: every launch starts from the seed tasks (or empty with --empty).
#[derive(Parser)]
#[command(name = "tb", version, about = "In-memory kanban task board")]
pub struct Cli {
    /// Path to a TOML settings file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Start with no tasks instead of the seed list.
    #[arg(long, global = true)]
    pub empty: bool,

    /// Write logs to this file instead of stderr.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}
