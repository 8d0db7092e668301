//! Domain logic for client-side operations.
//!
//! This module contains pure functions and state that implement client
//! behaviour without side effects, making them easy to test.

use irori_server::infrastructure::dto::websocket::ServerEvent;

use crate::error::ClientError;

/// What the client knows about the room
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientState {
    /// Nickname to join with, replaced by the one the server assigns
    nick: String,
    /// Latest roster received from the server
    roster: Vec<String>,
}

impl ClientState {
    pub fn new(nick: impl Into<String>) -> Self {
        Self {
            nick: nick.into(),
            roster: Vec::new(),
        }
    }

    pub fn nick(&self) -> &str {
        &self.nick
    }

    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    /// Track nickname assignments and roster updates
    pub fn apply(&mut self, event: &ServerEvent) {
        match event {
            ServerEvent::Nick(payload) => self.nick = payload.nick.clone(),
            ServerEvent::Users(payload) => self.roster = payload.users.clone(),
            ServerEvent::ChatMsg(_) => {}
        }
    }
}

/// Check if the client should exit immediately based on the error type.
///
/// A server-initiated close means the room rejected us or we quit, so
/// reconnecting would not help.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::ClosedByServer)
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }
    current_attempt < max_attempts
}

/// Counts consecutive failed sessions.
///
/// A session that got connected resets the count, so only an unbroken run
/// of failures can exhaust the attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectTracker {
    failures: u32,
    max_attempts: u32,
}

impl ReconnectTracker {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            failures: 0,
            max_attempts,
        }
    }

    /// The next connection attempt, 1-indexed
    pub fn attempt(&self) -> u32 {
        self.failures + 1
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn connected(&mut self) {
        self.failures = 0;
    }

    /// Record a failed session and tell whether to try again
    pub fn record_failure(&mut self, error: &ClientError) -> bool {
        self.failures += 1;
        should_attempt_reconnect(error, self.failures, self.max_attempts)
    }
}
