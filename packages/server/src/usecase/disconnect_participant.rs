//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 参加者の削除、退室通知の文面、ロスターの再送
//!
//! ### なぜこのテストが必要か
//! - 退室理由は切断した接続自身のものだけが使われることを保証
//! - 満室時の切断が無視される挙動を記録しておく
//!
//! ### どのような状況を想定しているか
//! - 正常系：理由なしの退室、理由付きの退室
//! - エッジケース：最後の参加者の切断、他の接続の退室理由、複数の接続の退室理由
//! - 異常系：存在しない参加者の切断、満室時の切断

use std::sync::Arc;

use crate::domain::{
    ConnectionId, Departure, MessagePusher, Notice, Participant, RepositoryError, RoomError,
    RoomRepository,
};

use super::{
    error::DisconnectError,
    notify::{broadcast_roster, broadcast_to_room},
};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 切断を実行
    ///
    /// 送信チャンネルの登録解除は常に行う。満室判定、退室理由の取り出し、
    /// 参加者の削除は Repository の 1 回の呼び出しで行われ、参加者数が最大値に
    /// 達している間は参加者を削除しない。
    ///
    /// # Returns
    ///
    /// * `Ok(Participant)` - 削除された参加者
    /// * `Err(DisconnectError)` - 何も変更されなかった
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Participant, DisconnectError> {
        self.message_pusher.unregister_client(connection_id).await;

        let Departure {
            participant,
            quit_reason: reason,
        } = self
            .repository
            .depart_participant(connection_id)
            .await
            .map_err(|e| match e {
                RepositoryError::Room(RoomError::DepartureWhileFull(_)) => {
                    DisconnectError::RoomAtCapacity
                }
                _ => DisconnectError::ParticipantNotFound(connection_id.to_string()),
            })?;

        match reason.as_deref() {
            Some(reason) => tracing::info!("'{}' quit (\"{}\")", participant.nickname, reason),
            None => tracing::info!("'{}' left the room", participant.nickname),
        }

        let repository = self.repository.as_ref();
        let pusher = self.message_pusher.as_ref();
        let notice = Notice::departed(&participant.nickname, reason.as_deref());
        broadcast_to_room(repository, pusher, &notice).await;
        broadcast_roster(repository, pusher).await;

        Ok(participant)
    }
}
