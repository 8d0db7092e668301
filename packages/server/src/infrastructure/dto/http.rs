//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Room snapshot returned by `GET /api/room`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomStateDto {
    pub capacity: usize,
    pub participants: Vec<ParticipantDetailDto>,
    /// RFC 3339 (JST)
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantDetailDto {
    pub nickname: String,
    pub connection_id: String,
    /// RFC 3339 (JST)
    pub joined_at: String,
}
