//! Interactive chat session.

pub mod repl;
