//! Pure rendering of controller state into a printable view.

use std::fmt;

use shared::domain::{ChatMessage, RoomName};

use crate::controller::ViewController;

pub const TITLE: &str = "User Messages";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    pub rows: Vec<RoomRow>,
}

/// One room with its toggle and refresh controls.
///
/// `messages` is only filled for the expanded room once its list is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomRow {
    pub position: usize,
    pub room: RoomName,
    pub expanded: bool,
    pub messages: Option<Vec<MessageLine>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageLine {
    pub username: String,
    pub text: String,
    pub timestamp: String,
    pub visitor_id: String,
}

impl From<&ChatMessage> for MessageLine {
    fn from(message: &ChatMessage) -> Self {
        Self {
            username: message.username.clone(),
            text: message.message_text.clone(),
            timestamp: message.timestamp.to_local_string(),
            visitor_id: message.visitor_id.clone(),
        }
    }
}

pub fn render(controller: &ViewController) -> RenderedView {
    let rows = controller
        .rooms()
        .iter()
        .enumerate()
        .map(|(index, room)| {
            let expanded = controller.is_expanded(room);
            let messages = expanded
                .then(|| controller.cached_messages(room))
                .flatten()
                .map(|messages| messages.iter().map(MessageLine::from).collect());
            RoomRow {
                position: index + 1,
                room: room.clone(),
                expanded,
                messages,
            }
        })
        .collect();

    RenderedView { rows }
}

impl fmt::Display for RenderedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{TITLE:<40} [R] Refresh Rooms")?;
        for row in &self.rows {
            write!(f, "{row}")?;
        }
        Ok(())
    }
}

impl fmt::Display for RoomRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.expanded { "[-]" } else { "[+]" };
        let label = format!("#{} {marker} {}", self.position, self.room);
        writeln!(f, "  {label:<38} [r] Refresh")?;

        if let Some(messages) = &self.messages {
            for line in messages {
                writeln!(
                    f,
                    "       {}: {} ({})",
                    line.username, line.text, line.timestamp
                )?;
                writeln!(f, "         Visitor ID: {}", line.visitor_id)?;
            }
            writeln!(f, "       [r] Refresh")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
