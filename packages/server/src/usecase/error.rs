//! UseCase 層のエラー
//!
//! 利用者に見えるエラーは UseCase が通知を送った後に返される。
//! 呼び出し側（イベントループ）はログに残すだけでよい。

use thiserror::Error;

use crate::domain::RepositoryError;

/// 入室のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    #[error("Room is full")]
    RoomFull,

    #[error("Connection '{0}' has already joined")]
    AlreadyJoined(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

/// 切断処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisconnectError {
    #[error("Room is at capacity, disconnect ignored")]
    RoomAtCapacity,

    #[error("Participant '{0}' not found")]
    ParticipantNotFound(String),
}

/// ニックネーム変更のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenameError {
    #[error("Connection has not joined the room")]
    NotJoined,

    #[error("Invalid nickname '{0}'")]
    InvalidNickname(String),

    #[error("Nickname '{0}' is already taken")]
    NicknameTaken(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

/// 個別メッセージのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrivateMessageError {
    #[error("Target '{0}' not found")]
    TargetNotFound(String),

    #[error("Sender has not joined the room")]
    NotJoined,
}

/// ルームへの発言のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomMessageError {
    #[error("Sender has not joined the room")]
    NotJoined,
}

/// ルーム状態取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomStateError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
