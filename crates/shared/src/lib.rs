//! Wire and domain types shared by the room viewer client crates.

pub mod domain;
pub mod error;
pub mod protocol;
