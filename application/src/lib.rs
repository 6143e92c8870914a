//! Application layer for nexus-call-hub
//!
//! Use cases and ports. Ports define the interfaces the infrastructure
//! layer implements (chat gateway, auth gateway, room directory, queue
//! feed); use cases orchestrate domain entities through those ports.
//!
//! The streaming-chat coordination lives here: the [`StreamRegistry`]
//! holds at most one cancellation handle per in-flight request, and the
//! [`CancellationCoordinator`] drives the local-abort + remote-stop
//! sequence when the user cancels.

pub mod ports;
pub mod stream;
pub mod use_cases;

// Re-export commonly used types
pub use ports::auth_gateway::{AuthGateway, Credentials};
pub use ports::chat_gateway::{ChatGateway, GatewayError, StreamHandle};
pub use ports::queue_feed::QueueFeed;
pub use ports::room_directory::RoomDirectory;
pub use stream::coordinator::CancellationCoordinator;
pub use stream::registry::{RegistryError, StreamRegistry};
pub use use_cases::login::{LoginError, LoginUseCase};
pub use use_cases::run_chat::{ChatOutcome, RunChatError, RunChatUseCase};
