//! Ports implemented by the infrastructure layer.

pub mod auth_gateway;
pub mod chat_gateway;
pub mod queue_feed;
pub mod room_directory;
