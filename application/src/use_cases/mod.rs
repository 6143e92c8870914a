//! Use cases orchestrating the ports.

pub mod login;
pub mod run_chat;
