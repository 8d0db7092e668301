//! Notices produced by the room registry.
//!
//! Every user-visible text the registry emits is built here so the wording
//! stays in one place.

use super::{Nickname, Participant};

/// Purpose tag carried by a `chat-msg` notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Join,
    Left,
    Quit,
    System,
    SystemNormal,
    Error,
    PvtMsg,
    ChatMsg,
    ChatAction,
}

/// Outbound notice, addressed by the caller to one connection or to the room
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A line of chat or a system notice
    Chat { message: String, kind: NoticeKind },
    /// The recipient's current nickname
    Nick(String),
    /// The full roster in join order
    Users(Vec<String>),
}

impl Notice {
    fn chat(message: String, kind: NoticeKind) -> Self {
        Self::Chat { message, kind }
    }

    pub fn room_full() -> Self {
        Self::chat("* disconnected, the room is full".to_string(), NoticeKind::Left)
    }

    pub fn joined(nickname: &Nickname) -> Self {
        Self::chat(format!("* {} joined the room", nickname), NoticeKind::Join)
    }

    /// Sent to the connection that asked to quit
    pub fn disconnected(reason: Option<&str>) -> Self {
        let message = match reason.filter(|r| !r.is_empty()) {
            Some(reason) => format!("* you have been disconnected (\"{}\")", reason),
            None => "* you have been disconnected".to_string(),
        };
        Self::chat(message, NoticeKind::Quit)
    }

    /// Broadcast when a participant leaves; a non-empty reason makes it a quit
    pub fn departed(nickname: &Nickname, reason: Option<&str>) -> Self {
        match reason.filter(|r| !r.is_empty()) {
            Some(reason) => Self::chat(
                format!("* {} quit (\"{}\")", nickname, reason),
                NoticeKind::Quit,
            ),
            None => Self::chat(format!("* {} left the room", nickname), NoticeKind::Left),
        }
    }

    pub fn whois_found(participant: &Participant) -> Self {
        Self::chat(
            format!(
                "* whois: '{}' id: {}",
                participant.nickname, participant.connection_id
            ),
            NoticeKind::System,
        )
    }

    pub fn whois_not_found(query: &str) -> Self {
        Self::chat(
            format!("* whois: '{}' user not found", query),
            NoticeKind::System,
        )
    }

    pub fn nickname_changed(old: &Nickname, new: &Nickname) -> Self {
        Self::chat(
            format!("* {} changed nickname to {}", old, new),
            NoticeKind::SystemNormal,
        )
    }

    pub fn nickname_taken(requested: &str) -> Self {
        Self::chat(
            format!("* nickname '{}' already taken", requested),
            NoticeKind::Error,
        )
    }

    pub fn invalid_nickname(requested: &str) -> Self {
        Self::chat(
            format!("* invalid nickname '{}'", requested),
            NoticeKind::Error,
        )
    }

    pub fn not_joined() -> Self {
        Self::chat(
            "* you have not joined the room".to_string(),
            NoticeKind::Error,
        )
    }

    pub fn malformed_event() -> Self {
        Self::chat("* malformed event".to_string(), NoticeKind::Error)
    }

    pub fn pvt_target_not_found(to: &str) -> Self {
        Self::chat(
            format!("* pvt: \"{}\" user not found", to),
            NoticeKind::Error,
        )
    }

    /// Delivered to the recipient of a directed message
    pub fn pvt_incoming(from: &Nickname, body: &str) -> Self {
        Self::chat(format!("*from: \"{}\": {}", from, body), NoticeKind::PvtMsg)
    }

    /// Echoed back to the sender of a directed message
    pub fn pvt_outgoing(to: &Nickname, body: &str) -> Self {
        Self::chat(format!("*to: \"{}\": {}", to, body), NoticeKind::PvtMsg)
    }

    pub fn room_message(nickname: &str, body: &str) -> Self {
        Self::chat(format!("<{}> {}", nickname, body), NoticeKind::ChatMsg)
    }

    pub fn room_action(nickname: &str, body: &str) -> Self {
        Self::chat(format!("* {} {}", nickname, body), NoticeKind::ChatAction)
    }

    pub fn nick(nickname: &Nickname) -> Self {
        Self::Nick(nickname.as_str().to_string())
    }

    pub fn users(roster: Vec<String>) -> Self {
        Self::Users(roster)
    }
}
