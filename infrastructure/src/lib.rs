//! Infrastructure layer for nexus-call-hub
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer (HTTP gateways against the hub backend, including
//! the SSE chat stream transport) and configuration file loading.

pub mod api;
pub mod config;

// Re-export commonly used types
pub use api::{
    auth::HttpAuthGateway,
    chat::HttpChatGateway,
    client::{ApiClientError, HubApiClient},
    queue::HttpQueueFeed,
    rooms::HttpRoomDirectory,
};
pub use config::{ConfigLoader, FileConfig, FileServerConfig};
