//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for nexus-call-hub
#[derive(Parser, Debug)]
#[command(name = "nexus-call-hub")]
#[command(author, version, about = "Call-center hub client - assistant chat, queue monitor, rooms")]
#[command(long_about = r#"
Terminal client for the call-hub backend.

The chat subcommand opens an interactive streaming session with the
assistant; Ctrl-C while a reply is streaming cancels just that reply
(locally and, best effort, on the server).

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./hub.toml          Project-level config
3. ~/.config/nexus-call-hub/config.toml   Global config

Examples:
  nexus-call-hub chat
  nexus-call-hub ask "Where do I find the refund policy?"
  nexus-call-hub queue --watch
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress banners and decorations
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive streaming chat with the assistant
    Chat {
        /// Log in before starting the session
        #[arg(short, long)]
        login: bool,
    },

    /// One-shot question (non-streaming endpoint)
    Ask {
        /// The message to send
        message: String,
    },

    /// List company chat rooms
    Rooms,

    /// Show queue monitor snapshot
    Queue {
        /// Refresh continuously
        #[arg(short, long)]
        watch: bool,
    },
}
