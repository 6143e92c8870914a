//! Company chat rooms.

use serde::{Deserialize, Serialize};

/// A chat room as listed by the rooms endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    /// Preview of the most recent message, if the room has history.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message: Option<String>,
}
