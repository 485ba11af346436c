//! CLI - Command-line argument parsing
//!
//! Keeps argument parsing separate from execution logic.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SymbolicBot terminal client
#[derive(Parser, Debug)]
#[command(name = "symbotctl")]
#[command(about = "SymbolicBot - rule-based chat with Wikipedia lookups", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Config file (overrides $SYMBOT_CONFIG and the default location)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Canned-reply dataset (overrides [responses].path and the bundled one)
    #[arg(long, global = true)]
    pub responses: Option<PathBuf>,

    /// Log filter when RUST_LOG is unset (e.g. "info", "symbot_common=debug")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Subcommand (if not provided, starts the interactive chat)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Interactive chat session
    Chat,

    /// Answer a single message and exit
    Ask {
        /// Message text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Print the answer as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as TOML
    Config,
}

impl Cli {
    pub fn command_or_default(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Chat)
    }
}
