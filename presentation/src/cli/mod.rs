//! CLI argument handling.

pub mod commands;
