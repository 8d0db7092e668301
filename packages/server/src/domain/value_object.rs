//! Value objects of the room domain.

use uuid::Uuid;

use super::error::ValueObjectError;

/// Maximum nickname length in characters
pub const MAX_NICKNAME_LENGTH: usize = 32;

/// Transport-assigned identifier of one connection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::ConnectionIdEmpty);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generates connection ids for freshly upgraded sockets
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> ConnectionId {
        ConnectionId(Uuid::new_v4().to_string())
    }
}

/// Display name of a participant
///
/// Surrounding whitespace is trimmed; the result must be non-empty and at
/// most [`MAX_NICKNAME_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nickname(String);

impl Nickname {
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValueObjectError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::NicknameEmpty);
        }
        let length = trimmed.chars().count();
        if length > MAX_NICKNAME_LENGTH {
            return Err(ValueObjectError::NicknameTooLong {
                length,
                max: MAX_NICKNAME_LENGTH,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Generated guest name, `Guest<n>`
    pub fn guest(number: usize) -> Self {
        Self(format!("Guest{}", number))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Case-insensitive comparison used by `whois` and `pvt` lookups
    pub fn matches_ignore_case(&self, query: &str) -> bool {
        self.0.to_lowercase() == query.trim().to_lowercase()
    }
}

impl std::fmt::Display for Nickname {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unix timestamp in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
