//! Domain layer for the chat room.
//!
//! This module contains the room registry's state and policy, independent of
//! data transfer objects (DTOs) and transport concerns.

pub mod entity;
pub mod error;
pub mod guest_name;
pub mod message_pusher;
pub mod notice;
pub mod repository;
pub mod value_object;

pub use entity::{DEFAULT_MAX_PARTICIPANTS, Departure, Participant, Room};
pub use error::{MessagePushError, RepositoryError, RoomError, ValueObjectError};
pub use guest_name::{GuestNumberSource, RandomGuestNumberSource};
pub use message_pusher::{MessagePusher, Outgoing, PusherChannel};
pub use notice::{Notice, NoticeKind};
pub use repository::RoomRepository;
pub use value_object::{ConnectionId, ConnectionIdFactory, Nickname, Timestamp};
