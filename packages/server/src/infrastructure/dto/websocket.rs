//! WebSocket event DTOs.
//!
//! Inbound frames are flat JSON objects tagged by `event`; outbound frames
//! carry their payload under `data`.

use serde::{Deserialize, Serialize};

/// Event sent by a client
///
/// Missing string fields deserialize as empty strings and are validated by
/// the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ClientEvent {
    Join {
        #[serde(default)]
        nick: String,
    },
    Quit {
        #[serde(default)]
        message: String,
    },
    Whois {
        #[serde(default)]
        nick: String,
    },
    Nick {
        #[serde(default)]
        nick: String,
    },
    Pvt {
        #[serde(default)]
        to: String,
        #[serde(default)]
        message: String,
    },
    ChatMsg {
        #[serde(default)]
        nick: String,
        #[serde(default)]
        message: String,
    },
    ChatAction {
        #[serde(default)]
        nick: String,
        #[serde(default)]
        message: String,
    },
}

/// Event sent by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    ChatMsg(ChatNotice),
    Nick(NickPayload),
    Users(UsersPayload),
}

/// Chat line or system notice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatNotice {
    pub message: String,
    pub r#type: NoticeType,
}

/// Purpose tag of a [`ChatNotice`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoticeType {
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

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NickPayload {
    pub nick: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersPayload {
    pub users: Vec<String>,
}
