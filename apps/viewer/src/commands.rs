//! Stdin commands standing in for the view's buttons.

use client_core::ViewController;
use shared::domain::RoomName;
use thiserror::Error;

pub const USAGE: &str = "\
commands:
  toggle <room|#n>   (t)  expand or collapse a room
  refresh <room|#n>  (r)  re-fetch a room's messages
  rooms              (R)  re-fetch the room list
  show               (s)  print the view again
  help               (h)  this text
  quit               (q)  exit";

/// A room as typed by the user: by name, or by `#n` row position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomRef {
    Name(String),
    Row(usize),
}

impl RoomRef {
    /// Only rooms that currently have a row can be addressed.
    pub fn resolve<'a>(&self, controller: &'a ViewController) -> Option<&'a RoomName> {
        match self {
            Self::Row(row) => controller.room_at_row(*row),
            Self::Name(name) => controller
                .rooms()
                .iter()
                .find(|room| room.as_str() == name),
        }
    }
}

impl std::fmt::Display for RoomRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(name) => write!(f, "'{name}'"),
            Self::Row(row) => write!(f, "#{row}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerCommand {
    Toggle(RoomRef),
    Refresh(RoomRef),
    RefreshRooms,
    Show,
    Help,
    Quit,
}

impl ViewerCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Toggle(_) => "toggle",
            Self::Refresh(_) => "refresh",
            Self::RefreshRooms => "refresh_rooms",
            Self::Show => "show",
            Self::Help => "help",
            Self::Quit => "quit",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{0}' needs a room name or #row")]
    MissingRoom(&'static str),
    #[error("'#{0}' is not a row number")]
    BadRow(String),
}

pub fn parse_command(line: &str) -> Result<ViewerCommand, CommandError> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb {
        "" => Err(CommandError::Empty),
        "toggle" | "t" => Ok(ViewerCommand::Toggle(parse_room_ref("toggle", rest)?)),
        "refresh" | "r" => Ok(ViewerCommand::Refresh(parse_room_ref("refresh", rest)?)),
        "rooms" | "R" => Ok(ViewerCommand::RefreshRooms),
        "show" | "s" => Ok(ViewerCommand::Show),
        "help" | "h" | "?" => Ok(ViewerCommand::Help),
        "quit" | "q" | "exit" => Ok(ViewerCommand::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn parse_room_ref(verb: &'static str, rest: &str) -> Result<RoomRef, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingRoom(verb));
    }
    match rest.strip_prefix('#') {
        Some(row) => row
            .parse::<usize>()
            .map(RoomRef::Row)
            .map_err(|_| CommandError::BadRow(row.to_string())),
        None => Ok(RoomRef::Name(rest.to_string())),
    }
}
