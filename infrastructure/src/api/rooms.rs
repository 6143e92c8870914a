//! HTTP room directory.

use std::sync::Arc;

use async_trait::async_trait;
use hub_application::{GatewayError, RoomDirectory};
use hub_domain::Room;
use reqwest::Method;
use serde::Serialize;

use crate::api::client::{map_http_error, map_status, HubApiClient};
use crate::api::types::RoomDto;

const ROOMS_ENDPOINT: &str = "api/chatting/rooms";

#[derive(Serialize)]
struct CreateRoomBody<'a> {
    name: &'a str,
}

/// Room directory over the backend's HTTP API.
pub struct HttpRoomDirectory {
    client: Arc<HubApiClient>,
}

impl HttpRoomDirectory {
    pub fn new(client: Arc<HubApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RoomDirectory for HttpRoomDirectory {
    async fn list_rooms(&self) -> Result<Vec<Room>, GatewayError> {
        let response = self
            .client
            .request(Method::GET, ROOMS_ENDPOINT)
            .send()
            .await
            .map_err(map_http_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status(status));
        }

        let rooms: Vec<RoomDto> = response.json().await.map_err(map_http_error)?;
        Ok(rooms.into_iter().map(Room::from).collect())
    }

    async fn create_room(&self, name: &str) -> Result<Room, GatewayError> {
        let response = self
            .client
            .request(Method::POST, ROOMS_ENDPOINT)
            .json(&CreateRoomBody { name })
            .send()
            .await
            .map_err(map_http_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status(status));
        }

        let room: RoomDto = response.json().await.map_err(map_http_error)?;
        Ok(room.into())
    }
}
