use serde::{Deserialize, Serialize};

use crate::{
    domain::{ChatMessage, RoomName},
    error::ApiRejection,
};

/// Body of `GET /rooms`.
///
/// A body without `success` counts as a failure, so only the flag is trusted
/// and the payload lists default to empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub rooms: Vec<RoomName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RoomsResponse {
    pub fn into_rooms(self) -> Result<Vec<RoomName>, ApiRejection> {
        if self.success {
            Ok(self.rooms)
        } else {
            Err(ApiRejection::new(self.message))
        }
    }
}

/// Body of `GET /messages/{room}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MessagesResponse {
    pub fn into_messages(self) -> Result<Vec<ChatMessage>, ApiRejection> {
        if self.success {
            Ok(self.messages)
        } else {
            Err(ApiRejection::new(self.message))
        }
    }
}
