//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Warden - anti-nuke moderation agent for Discord guilds
#[derive(Parser, Debug)]
#[command(name = "warden")]
#[command(about = "Anti-nuke moderation agent for Discord guilds", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file layered over the defaults (replaces warden.toml and WARDEN_* lookup)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit JSON-formatted logs
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Connect to Discord and start guarding
    Run,

    /// Print the guard configuration, creating it with defaults if missing
    ShowConfig,
}
