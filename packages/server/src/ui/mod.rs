//! UI layer: HTTP/WebSocket surface of the chat room server.

mod event_loop;
mod handler;
mod server;
mod signal;
pub mod state;

pub use event_loop::{CommandSender, RoomCommand, RoomEvent, RoomEventLoop, RoomUseCases};
pub use server::Server;
