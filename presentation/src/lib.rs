//! Presentation layer for nexus-call-hub
//!
//! CLI argument definitions, the interactive chat REPL, and console
//! output formatting.

pub mod chat;
pub mod cli;
pub mod output;

// Re-export commonly used types
pub use chat::repl::ChatRepl;
pub use cli::commands::{Cli, Command};
pub use output::console::ConsoleFormatter;
