//! Room directory port: company chat room listing.

use async_trait::async_trait;
use hub_domain::Room;

use crate::ports::chat_gateway::GatewayError;

/// Read access to the company chat rooms.
#[async_trait]
pub trait RoomDirectory: Send + Sync {
    async fn list_rooms(&self) -> Result<Vec<Room>, GatewayError>;

    async fn create_room(&self, name: &str) -> Result<Room, GatewayError>;
}
