//! Conversion logic between DTOs and domain entities.

use irori_shared::time::timestamp_to_jst_rfc3339;

use crate::domain::{Notice, NoticeKind, Participant, Room};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain → DTO
// ========================================

impl From<NoticeKind> for dto::NoticeType {
    fn from(kind: NoticeKind) -> Self {
        match kind {
            NoticeKind::Join => Self::Join,
            NoticeKind::Left => Self::Left,
            NoticeKind::Quit => Self::Quit,
            NoticeKind::System => Self::System,
            NoticeKind::SystemNormal => Self::SystemNormal,
            NoticeKind::Error => Self::Error,
            NoticeKind::PvtMsg => Self::PvtMsg,
            NoticeKind::ChatMsg => Self::ChatMsg,
            NoticeKind::ChatAction => Self::ChatAction,
        }
    }
}

impl From<Notice> for dto::ServerEvent {
    fn from(notice: Notice) -> Self {
        match notice {
            Notice::Chat { message, kind } => Self::ChatMsg(dto::ChatNotice {
                message,
                r#type: kind.into(),
            }),
            Notice::Nick(nick) => Self::Nick(dto::NickPayload { nick }),
            Notice::Users(users) => Self::Users(dto::UsersPayload { users }),
        }
    }
}

impl From<&Participant> for http::ParticipantDetailDto {
    fn from(participant: &Participant) -> Self {
        Self {
            nickname: participant.nickname.as_str().to_string(),
            connection_id: participant.connection_id.as_str().to_string(),
            joined_at: timestamp_to_jst_rfc3339(participant.joined_at.value()),
        }
    }
}

impl From<&Room> for http::RoomStateDto {
    fn from(room: &Room) -> Self {
        Self {
            capacity: room.capacity(),
            participants: room.participants().iter().map(Into::into).collect(),
            created_at: timestamp_to_jst_rfc3339(room.created_at.value()),
        }
    }
}
