//! Domain errors.

use thiserror::Error;

/// Value object validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("ConnectionId cannot be empty")]
    ConnectionIdEmpty,

    #[error("Nickname cannot be empty")]
    NicknameEmpty,

    #[error("Nickname is too long: {length} characters (max {max})")]
    NicknameTooLong { length: usize, max: usize },
}

/// Room invariant violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("Room capacity exceeded (max {0} participants)")]
    CapacityExceeded(usize),

    #[error("Connection '{0}' has already joined the room")]
    AlreadyJoined(String),

    #[error("Participant '{0}' not found")]
    ParticipantNotFound(String),

    #[error("Nickname '{0}' is already taken")]
    NicknameTaken(String),

    #[error("Room is full ({0} participants), departure ignored")]
    DepartureWhileFull(usize),
}

/// Repository errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Room(#[from] RoomError),
}

/// Message push errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Client '{0}' is not registered")]
    ClientNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
