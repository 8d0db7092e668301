//! Chat room server library.
//!
//! A bounded room of WebSocket participants with nicknames, room-wide
//! messages, directed messages and system notices.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

mod bootstrap;

pub use bootstrap::{RoomSettings, build_server, build_server_with};
