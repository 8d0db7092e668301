//! UseCase: ニックネーム変更
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ChangeNicknameUseCase::execute() メソッド
//!
//! ### どのような状況を想定しているか
//! - 正常系：空いているニックネームへの変更と 2 種類のブロードキャスト
//! - 異常系：使用中のニックネーム（自分自身の現在の名前を含む）、不正な名前、未参加
//! - いずれの異常系でも状態は変わらず、元のニックネームが再通知される

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, Nickname, Notice, RepositoryError, RoomError, RoomRepository,
};

use super::{
    error::RenameError,
    notify::{broadcast_roster, broadcast_to_room, push_or_warn},
};

/// ニックネーム変更のユースケース
pub struct ChangeNicknameUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ChangeNicknameUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// ニックネームを変更
    ///
    /// # Returns
    ///
    /// * `Ok((old, new))` - 変更前と変更後のニックネーム
    /// * `Err(RenameError)` - 要求者への通知は送信済み
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        requested: &str,
    ) -> Result<(Nickname, Nickname), RenameError> {
        let pusher = self.message_pusher.as_ref();

        let Some(participant) = self.repository.find_by_connection(connection_id).await else {
            push_or_warn(pusher, connection_id, &Notice::not_joined()).await;
            return Err(RenameError::NotJoined);
        };
        let current = participant.nickname;

        let new_nickname = match Nickname::new(requested) {
            Ok(nickname) => nickname,
            Err(e) => {
                tracing::debug!("Rejected nickname '{}': {}", requested, e);
                push_or_warn(pusher, connection_id, &Notice::invalid_nickname(requested)).await;
                push_or_warn(pusher, connection_id, &Notice::nick(&current)).await;
                return Err(RenameError::InvalidNickname(requested.to_string()));
            }
        };

        let old = match self
            .repository
            .rename_participant(connection_id, new_nickname.clone())
            .await
        {
            Ok(old) => old,
            Err(RepositoryError::Room(RoomError::NicknameTaken(taken))) => {
                push_or_warn(pusher, connection_id, &Notice::nickname_taken(requested)).await;
                push_or_warn(pusher, connection_id, &Notice::nick(&current)).await;
                return Err(RenameError::NicknameTaken(taken));
            }
            Err(RepositoryError::Room(RoomError::ParticipantNotFound(_))) => {
                push_or_warn(pusher, connection_id, &Notice::not_joined()).await;
                return Err(RenameError::NotJoined);
            }
            Err(e) => return Err(RenameError::Repository(e)),
        };

        tracing::info!("'{}' changed nickname to '{}'", old, new_nickname);

        let repository = self.repository.as_ref();
        broadcast_to_room(
            repository,
            pusher,
            &Notice::nickname_changed(&old, &new_nickname),
        )
        .await;
        broadcast_roster(repository, pusher).await;

        Ok((old, new_nickname))
    }
}
