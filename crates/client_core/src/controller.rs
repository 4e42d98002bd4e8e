//! View controller: room list, expanded room and per-room message cache.
//!
//! Transitions only touch local state and hand back the fetches they need as
//! [`FetchEffect`]s. Whoever runs the effects feeds the results back through
//! [`ViewController::apply`], in completion order.

use std::collections::HashMap;

use shared::domain::{ChatMessage, RoomName};
use tracing::{debug, error, info};

use crate::error::FetchError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchEffect {
    Rooms,
    Messages(RoomName),
}

impl FetchEffect {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rooms => "load_rooms",
            Self::Messages(_) => "load_messages",
        }
    }
}

#[derive(Debug)]
pub enum FetchOutcome {
    Rooms(Result<Vec<RoomName>, FetchError>),
    Messages {
        room: RoomName,
        result: Result<Vec<ChatMessage>, FetchError>,
    },
}

#[derive(Debug, Default)]
pub struct ViewController {
    rooms: Vec<RoomName>,
    expanded: Option<RoomName>,
    messages: HashMap<RoomName, Vec<ChatMessage>>,
    started: bool,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The one-time startup load. Returns `None` on every later call.
    pub fn start(&mut self) -> Option<FetchEffect> {
        if self.started {
            return None;
        }
        self.started = true;
        Some(FetchEffect::Rooms)
    }

    pub fn refresh_rooms(&self) -> FetchEffect {
        FetchEffect::Rooms
    }

    /// Re-fetch one room's messages whether or not it is expanded.
    pub fn refresh_room(&self, room: &RoomName) -> FetchEffect {
        FetchEffect::Messages(room.clone())
    }

    /// Collapse `room` if it is expanded, otherwise expand it and load its
    /// messages unless some list (possibly empty) is already cached.
    pub fn toggle_room(&mut self, room: &RoomName) -> Option<FetchEffect> {
        if self.expanded.as_ref() == Some(room) {
            self.expanded = None;
            return None;
        }

        self.expanded = Some(room.clone());
        if self.messages.contains_key(room) {
            None
        } else {
            Some(FetchEffect::Messages(room.clone()))
        }
    }

    /// Applies a finished fetch. Failures are logged and leave state as it
    /// was. Returns whether anything changed.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        match outcome {
            FetchOutcome::Rooms(Ok(rooms)) => {
                info!(count = rooms.len(), "room list updated");
                self.rooms = rooms;
                true
            }
            FetchOutcome::Rooms(Err(err)) => {
                error!(kind = err.kind(), "error fetching rooms: {err}");
                false
            }
            FetchOutcome::Messages {
                room,
                result: Ok(messages),
            } => {
                debug!(%room, count = messages.len(), "message cache updated");
                self.messages.insert(room, messages);
                true
            }
            FetchOutcome::Messages {
                room,
                result: Err(err),
            } => {
                error!(%room, kind = err.kind(), "error fetching messages: {err}");
                false
            }
        }
    }

    pub fn rooms(&self) -> &[RoomName] {
        &self.rooms
    }

    pub fn expanded(&self) -> Option<&RoomName> {
        self.expanded.as_ref()
    }

    pub fn is_expanded(&self, room: &RoomName) -> bool {
        self.expanded.as_ref() == Some(room)
    }

    pub fn cached_messages(&self, room: &RoomName) -> Option<&[ChatMessage]> {
        self.messages.get(room).map(Vec::as_slice)
    }

    /// Room at a 1-based row position, as rendered.
    pub fn room_at_row(&self, row: usize) -> Option<&RoomName> {
        row.checked_sub(1).and_then(|index| self.rooms.get(index))
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
