//! HTTP adapters for the hub backend.

pub mod auth;
pub mod chat;
pub mod client;
pub mod queue;
pub mod rooms;
pub mod sse;
pub mod types;
