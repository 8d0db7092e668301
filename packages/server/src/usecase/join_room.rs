//! UseCase: 入室処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 入室の可否判定、ニックネームの決定、通知の順序
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規参加者の入室と 3 種類の通知
//! - 異常系：満室時の拒否と強制切断
//! - エッジケース：ニックネームの衝突、同じ接続からの二重入室

use std::sync::Arc;

use irori_shared::time::Clock;

use crate::domain::{
    ConnectionId, GuestNumberSource, MessagePusher, Notice, Participant, RepositoryError,
    RoomError, RoomRepository, Timestamp,
};

use super::{
    error::JoinError,
    notify::{broadcast_roster, broadcast_to_room, push_or_warn, terminate_or_warn},
};

/// 入室のユースケース
pub struct JoinRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    /// ゲスト名の番号を引くソース
    guest_numbers: Arc<dyn GuestNumberSource>,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        guest_numbers: Arc<dyn GuestNumberSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            guest_numbers,
            clock,
        }
    }

    /// 入室を実行
    ///
    /// 成功時の通知順序：
    /// 1. 入室通知を全員（本人を含む）にブロードキャスト
    /// 2. 確定したニックネームを本人に送信
    /// 3. ロスターを全員にブロードキャスト
    ///
    /// 満室の場合は本人に通知して接続を終了させ、状態は変更しない。
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        requested_nickname: &str,
    ) -> Result<Participant, JoinError> {
        let joined_at = Timestamp::new(self.clock.now_millis());
        let admitted = self
            .repository
            .admit_participant(
                connection_id.clone(),
                requested_nickname,
                self.guest_numbers.as_ref(),
                joined_at,
            )
            .await;

        let participant = match admitted {
            Ok(participant) => participant,
            Err(RepositoryError::Room(RoomError::CapacityExceeded(capacity))) => {
                tracing::warn!(
                    "Room is full ({} participants), rejecting connection '{}'",
                    capacity,
                    connection_id
                );
                let pusher = self.message_pusher.as_ref();
                push_or_warn(pusher, &connection_id, &Notice::room_full()).await;
                terminate_or_warn(pusher, &connection_id).await;
                return Err(JoinError::RoomFull);
            }
            Err(RepositoryError::Room(RoomError::AlreadyJoined(id))) => {
                tracing::warn!("Connection '{}' sent join twice, ignoring", id);
                return Err(JoinError::AlreadyJoined(id));
            }
            Err(e) => return Err(JoinError::Repository(e)),
        };

        if participant.nickname.as_str() != requested_nickname.trim() {
            tracing::info!(
                "Requested nickname '{}' unavailable, assigned '{}'",
                requested_nickname,
                participant.nickname
            );
        }
        tracing::info!(
            "'{}' joined the room as connection '{}'",
            participant.nickname,
            participant.connection_id
        );

        let repository = self.repository.as_ref();
        let pusher = self.message_pusher.as_ref();
        broadcast_to_room(repository, pusher, &Notice::joined(&participant.nickname)).await;
        push_or_warn(pusher, &connection_id, &Notice::nick(&participant.nickname)).await;
        broadcast_roster(repository, pusher).await;

        Ok(participant)
    }
}
