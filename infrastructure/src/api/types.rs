//! Wire types for the hub backend's REST endpoints.
//!
//! The backend wraps most responses in a `{ success, message, data }`
//! envelope and uses camelCase field names; these DTOs keep that shape at
//! the boundary and map into domain types.

use hub_domain::{AgentStatus, Availability, QueueStatus, Room, User};
use serde::{Deserialize, Serialize};

/// Common response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

/// Payload of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseData {
    pub username: String,
    #[serde(default)]
    pub message: String,
    pub token: String,
    pub token_type: String,
}

/// User info as returned by `/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfoDto {
    pub id: u64,
    pub username: String,
    pub name: String,
    pub department: String,
    pub role: String,
}

impl UserInfoDto {
    /// Combine profile info with the bearer token into a domain user.
    pub fn into_user(self, token: String) -> User {
        User {
            id: self.id.to_string(),
            username: self.username,
            name: self.name,
            department: self.department,
            role: self.role,
            token,
        }
    }
}

/// Room row from `/api/chatting/rooms`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub last_message: Option<String>,
}

impl From<RoomDto> for Room {
    fn from(dto: RoomDto) -> Self {
        Room {
            id: dto.id,
            name: dto.name,
            last_message: dto.last_message,
        }
    }
}

/// Aggregate queue counters from the queue endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueStatusDto {
    pub inbound_waiting: u32,
    pub inbound_agents_available: u32,
    pub inbound_agents_total: u32,
    pub outbound_active_campaigns: u32,
    pub outbound_calls_in_progress: u32,
    pub outbound_calls_today: u32,
}

impl From<QueueStatusDto> for QueueStatus {
    fn from(dto: QueueStatusDto) -> Self {
        QueueStatus {
            inbound_waiting: dto.inbound_waiting,
            inbound_agents_available: dto.inbound_agents_available,
            inbound_agents_total: dto.inbound_agents_total,
            outbound_active_campaigns: dto.outbound_active_campaigns,
            outbound_calls_in_progress: dto.outbound_calls_in_progress,
            outbound_calls_today: dto.outbound_calls_today,
        }
    }
}

/// Per-agent row from the queue endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentStatusDto {
    pub id: String,
    pub name: String,
    pub status: Availability,
    #[serde(default)]
    pub current_call: Option<String>,
    #[serde(default)]
    pub call_duration: Option<u32>,
}

impl From<AgentStatusDto> for AgentStatus {
    fn from(dto: AgentStatusDto) -> Self {
        AgentStatus {
            id: dto.id,
            name: dto.name,
            status: dto.status,
            current_call: dto.current_call,
            call_duration: dto.call_duration,
        }
    }
}

/// Response of the remote stop endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopResponse {
    /// Whether a matching in-flight generation was found and stopped.
    pub stopped: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_with_login_data() {
        let json = r#"{
            "success": true,
            "message": "ok",
            "data": {"username": "agent01", "token": "t1", "tokenType": "Bearer"}
        }"#;
        let envelope: ApiEnvelope<LoginResponseData> = serde_json::from_str(json).unwrap();
        assert!(envelope.success);
        let data = envelope.data.unwrap();
        assert_eq!(data.token, "t1");
        assert_eq!(data.token_type, "Bearer");
    }

    #[test]
    fn envelope_without_data() {
        let envelope: ApiEnvelope<LoginResponseData> =
            serde_json::from_str(r#"{"success": false, "message": "bad credentials"}"#).unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
    }

    #[test]
    fn room_dto_uses_camel_case() {
        let dto: RoomDto =
            serde_json::from_str(r#"{"id":"r1","name":"CS","lastMessage":"hi"}"#).unwrap();
        let room: Room = dto.into();
        assert_eq!(room.last_message.as_deref(), Some("hi"));
    }

    #[test]
    fn user_dto_maps_numeric_id() {
        let dto: UserInfoDto = serde_json::from_str(
            r#"{"id":7,"username":"jkim","name":"J. Kim","department":"Inbound","role":"agent"}"#,
        )
        .unwrap();
        let user = dto.into_user("tok".into());
        assert_eq!(user.id, "7");
        assert_eq!(user.token, "tok");
    }
}
