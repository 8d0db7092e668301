//! Entities of the room domain.
//!
//! `Room` holds the whole registry state: the ordered participants and the
//! quit reasons waiting for their disconnects. All invariants are enforced here; the repository only
//! serializes access to it.

use std::collections::HashMap;

use super::{ConnectionId, GuestNumberSource, Nickname, RoomError, Timestamp};

/// Default room capacity
pub const DEFAULT_MAX_PARTICIPANTS: usize = 10;

/// Random guest-name draws before falling back to numbers above capacity
pub const MAX_GUEST_ATTEMPTS: usize = 32;

/// A connected, registered user of the room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub connection_id: ConnectionId,
    pub nickname: Nickname,
    pub joined_at: Timestamp,
}

/// Outcome of a disconnect that removed a participant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub participant: Participant,
    /// Non-empty reason given by a preceding quit
    pub quit_reason: Option<String>,
}

/// The chat room
#[derive(Debug, Clone)]
pub struct Room {
    participants: Vec<Participant>,
    capacity: usize,
    pending_quits: HashMap<ConnectionId, String>,
    pub created_at: Timestamp,
}

impl Room {
    pub fn new(created_at: Timestamp) -> Self {
        Self::with_capacity(created_at, DEFAULT_MAX_PARTICIPANTS)
    }

    /// A room admitting at most `capacity` participants (at least one)
    pub fn with_capacity(created_at: Timestamp, capacity: usize) -> Self {
        Self {
            participants: Vec::new(),
            capacity: capacity.max(1),
            pending_quits: HashMap::new(),
            created_at,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() >= self.capacity
    }

    pub fn find_by_connection(&self, connection_id: &ConnectionId) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|p| &p.connection_id == connection_id)
    }

    /// Case-insensitive lookup, first match in join order
    pub fn find_by_nickname(&self, query: &str) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|p| p.nickname.matches_ignore_case(query))
    }

    /// Case-sensitive collision check used by join and rename
    pub fn is_nickname_taken(&self, nickname: &Nickname) -> bool {
        self.participants.iter().any(|p| &p.nickname == nickname)
    }

    /// Pick the nickname a joining connection will get.
    ///
    /// The requested name wins when it is valid and free. Otherwise random
    /// `Guest<n>` names with `n` in `1..=capacity` are tried, and after
    /// [`MAX_GUEST_ATTEMPTS`] misses the first free `Guest<n>` above the
    /// capacity is used.
    pub fn resolve_nickname(
        &self,
        requested: &str,
        guest_numbers: &dyn GuestNumberSource,
    ) -> Nickname {
        if let Ok(nickname) = Nickname::new(requested)
            && !self.is_nickname_taken(&nickname)
        {
            return nickname;
        }

        for _ in 0..MAX_GUEST_ATTEMPTS {
            let candidate = Nickname::guest(guest_numbers.draw(self.capacity));
            if !self.is_nickname_taken(&candidate) {
                return candidate;
            }
        }

        let mut number = self.capacity + 1;
        loop {
            let candidate = Nickname::guest(number);
            if !self.is_nickname_taken(&candidate) {
                return candidate;
            }
            number += 1;
        }
    }

    /// Admit a connection, appending it to the roster.
    pub fn admit(
        &mut self,
        connection_id: ConnectionId,
        requested: &str,
        guest_numbers: &dyn GuestNumberSource,
        joined_at: Timestamp,
    ) -> Result<Participant, RoomError> {
        if self.is_full() {
            return Err(RoomError::CapacityExceeded(self.capacity));
        }
        if self.find_by_connection(&connection_id).is_some() {
            return Err(RoomError::AlreadyJoined(connection_id.into_string()));
        }

        let participant = Participant {
            nickname: self.resolve_nickname(requested, guest_numbers),
            connection_id,
            joined_at,
        };
        self.participants.push(participant.clone());
        Ok(participant)
    }

    /// Remove a participant; absent ids leave the room untouched.
    pub fn remove(&mut self, connection_id: &ConnectionId) -> Option<Participant> {
        let index = self
            .participants
            .iter()
            .position(|p| &p.connection_id == connection_id)?;
        Some(self.participants.remove(index))
    }

    /// Handle a connection's disconnect.
    ///
    /// The connection's pending quit reason is always discarded. While the
    /// room is full nothing else changes; otherwise the participant is
    /// removed together with that reason.
    pub fn depart(&mut self, connection_id: &ConnectionId) -> Result<Departure, RoomError> {
        let quit_reason = self.take_quit_reason(connection_id);
        if self.is_full() {
            return Err(RoomError::DepartureWhileFull(self.capacity));
        }
        let participant = self
            .remove(connection_id)
            .ok_or_else(|| RoomError::ParticipantNotFound(connection_id.to_string()))?;
        Ok(Departure {
            participant,
            quit_reason,
        })
    }

    /// Change a participant's nickname in place, returning the old one.
    ///
    /// A nickname held by anyone, the requester included, is rejected.
    pub fn rename(
        &mut self,
        connection_id: &ConnectionId,
        nickname: Nickname,
    ) -> Result<Nickname, RoomError> {
        if self.is_nickname_taken(&nickname) {
            return Err(RoomError::NicknameTaken(nickname.into_string()));
        }
        let participant = self
            .participants
            .iter_mut()
            .find(|p| &p.connection_id == connection_id)
            .ok_or_else(|| RoomError::ParticipantNotFound(connection_id.to_string()))?;
        Ok(std::mem::replace(&mut participant.nickname, nickname))
    }

    /// Nicknames in join order
    pub fn roster(&self) -> Vec<String> {
        self.participants
            .iter()
            .map(|p| p.nickname.as_str().to_string())
            .collect()
    }

    pub fn connection_ids(&self) -> Vec<ConnectionId> {
        self.participants
            .iter()
            .map(|p| p.connection_id.clone())
            .collect()
    }

    /// Remember why a connection is quitting; replaces its earlier reason.
    pub fn record_quit_reason(&mut self, connection_id: ConnectionId, reason: String) {
        self.pending_quits.insert(connection_id, reason);
    }

    /// Take the reason recorded by `connection_id`.
    ///
    /// Empty reasons are consumed but reported as `None`. Reasons recorded
    /// by other connections stay pending.
    pub fn take_quit_reason(&mut self, connection_id: &ConnectionId) -> Option<String> {
        self.pending_quits
            .remove(connection_id)
            .filter(|reason| !reason.is_empty())
    }

    pub fn pending_quit_count(&self) -> usize {
        self.pending_quits.len()
    }
}
