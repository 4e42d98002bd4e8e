use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use shared::{
    domain::{ChatMessage, MessageTimestamp, RoomName},
    error::ApiRejection,
};

use crate::{api::RoomsApi, error::FetchError};

pub(crate) fn room_list(names: &[&str]) -> Vec<RoomName> {
    names.iter().copied().map(RoomName::from).collect()
}

pub(crate) fn chat_message(
    username: &str,
    text: &str,
    timestamp: &str,
    visitor_id: &str,
) -> ChatMessage {
    ChatMessage {
        username: username.to_string(),
        message_text: text.to_string(),
        timestamp: MessageTimestamp::parse_str(timestamp),
        visitor_id: visitor_id.to_string(),
    }
}

pub(crate) fn rejected(message: &str) -> FetchError {
    FetchError::Rejected(ApiRejection::new(Some(message.to_string())))
}

/// Scripted `RoomsApi` that records every call.
pub(crate) struct FakeRoomsApi {
    rooms: Mutex<Result<Vec<RoomName>, String>>,
    messages: Mutex<HashMap<RoomName, Result<Vec<ChatMessage>, String>>>,
    rooms_calls: AtomicUsize,
    message_calls: Mutex<Vec<RoomName>>,
}

impl FakeRoomsApi {
    pub(crate) fn new() -> Self {
        Self {
            rooms: Mutex::new(Ok(Vec::new())),
            messages: Mutex::new(HashMap::new()),
            rooms_calls: AtomicUsize::new(0),
            message_calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn set_rooms(&self, rooms: Result<Vec<RoomName>, String>) {
        *self.rooms.lock().expect("rooms lock") = rooms;
    }

    pub(crate) fn set_messages(&self, room: &str, messages: Result<Vec<ChatMessage>, String>) {
        self.messages
            .lock()
            .expect("messages lock")
            .insert(RoomName::from(room), messages);
    }

    pub(crate) fn rooms_calls(&self) -> usize {
        self.rooms_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn message_calls(&self) -> Vec<RoomName> {
        self.message_calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl RoomsApi for FakeRoomsApi {
    async fn fetch_rooms(&self) -> Result<Vec<RoomName>, FetchError> {
        self.rooms_calls.fetch_add(1, Ordering::SeqCst);
        self.rooms
            .lock()
            .expect("rooms lock")
            .clone()
            .map_err(|message| rejected(&message))
    }

    async fn fetch_messages(&self, room: &RoomName) -> Result<Vec<ChatMessage>, FetchError> {
        self.message_calls
            .lock()
            .expect("calls lock")
            .push(room.clone());
        self.messages
            .lock()
            .expect("messages lock")
            .get(room)
            .cloned()
            .unwrap_or_else(|| Err(format!("no messages scripted for {room}")))
            .map_err(|message| rejected(&message))
    }
}
