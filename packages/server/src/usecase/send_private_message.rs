//! UseCase: 個別メッセージ（pvt）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendPrivateMessageUseCase::execute() メソッド
//! - 宛先への配送と送信者へのエコーがちょうど 2 通であること
//!
//! ### どのような状況を想定しているか
//! - 正常系：大文字小文字を区別しない宛先検索
//! - 異常系：存在しない宛先（送信者へのエラー通知 1 通のみ）、未参加の送信者

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, Notice, Participant, RoomRepository};

use super::{error::PrivateMessageError, notify::push_or_warn};

/// 個別メッセージのユースケース
pub struct SendPrivateMessageUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl SendPrivateMessageUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 宛先に届け、送信者にエコーする
    ///
    /// # Returns
    ///
    /// * `Ok(Participant)` - 宛先の参加者
    /// * `Err(PrivateMessageError)` - 送信者へのエラー通知は送信済み
    pub async fn execute(
        &self,
        sender_id: &ConnectionId,
        to: &str,
        body: &str,
    ) -> Result<Participant, PrivateMessageError> {
        let pusher = self.message_pusher.as_ref();

        let Some(target) = self.repository.find_by_nickname(to).await else {
            push_or_warn(pusher, sender_id, &Notice::pvt_target_not_found(to)).await;
            return Err(PrivateMessageError::TargetNotFound(to.to_string()));
        };
        let Some(sender) = self.repository.find_by_connection(sender_id).await else {
            push_or_warn(pusher, sender_id, &Notice::not_joined()).await;
            return Err(PrivateMessageError::NotJoined);
        };

        tracing::debug!("pvt from '{}' to '{}'", sender.nickname, target.nickname);
        push_or_warn(
            pusher,
            &target.connection_id,
            &Notice::pvt_incoming(&sender.nickname, body),
        )
        .await;
        push_or_warn(
            pusher,
            sender_id,
            &Notice::pvt_outgoing(&target.nickname, body),
        )
        .await;

        Ok(target)
    }
}
