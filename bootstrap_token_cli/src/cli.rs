//! Command line definition

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "bootstrap-token",
    version,
    about = "Validate, split, join and convert cluster bootstrap tokens"
)]
pub struct Cli {
    /// Emit JSON instead of plain text
    #[arg(long, global = true)]
    pub json: bool,

    /// Print token secrets instead of masking them
    #[arg(long, global = true)]
    pub reveal: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check tokens against the grammar ("-" reads one token per line from stdin)
    Validate {
        tokens: Vec<String>,

        /// File with one token per line (blank lines and '#' comments skipped)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Print the id and secret of a combined token
    Split { token: String },

    /// Build a combined token from its id and secret
    Join {
        #[arg(long)]
        id: String,

        #[arg(long)]
        secret: String,
    },

    /// Print a token as a JSON string literal
    Encode { token: String },

    /// Decode a JSON string literal from a file, or stdin when omitted or "-"
    Decode { path: Option<PathBuf> },
}
