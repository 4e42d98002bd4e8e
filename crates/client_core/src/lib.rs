//! Client side of the room viewer: the rooms service seam, the view
//! controller that owns UI state, and the fetch runtime that feeds it.

pub mod api;
pub mod controller;
pub mod error;
pub mod render;
pub mod runtime;

pub use api::{HttpRoomsApi, RoomsApi};
pub use controller::{FetchEffect, FetchOutcome, ViewController};
pub use error::{BaseUrlError, FetchError};
pub use render::{render, MessageLine, RenderedView, RoomRow};
pub use runtime::{perform, FetchRuntime};

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
