//! UseCase: ルームへの発言（chat-msg / chat-action）
//!
//! 表示名は通常、送信者の接続に登録されたニックネームを使う。
//! `trust_declared_nickname` が有効な場合のみクライアントが申告した名前を使う。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, Notice, RoomRepository};

use super::{
    error::RoomMessageError,
    notify::{broadcast_to_room, push_or_warn},
};

/// 発言の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    /// `<nick> body`
    Say,
    /// `* nick body`
    Action,
}

/// ルームへの発言のユースケース
pub struct SendRoomMessageUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    trust_declared_nickname: bool,
}

impl SendRoomMessageUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        trust_declared_nickname: bool,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            trust_declared_nickname,
        }
    }

    /// 発言を全参加者にブロードキャスト
    pub async fn execute(
        &self,
        sender_id: &ConnectionId,
        declared_nickname: &str,
        body: &str,
        style: MessageStyle,
    ) -> Result<(), RoomMessageError> {
        let display_name = if self.trust_declared_nickname {
            declared_nickname.to_string()
        } else {
            match self.repository.find_by_connection(sender_id).await {
                Some(sender) => sender.nickname.into_string(),
                None => {
                    push_or_warn(self.message_pusher.as_ref(), sender_id, &Notice::not_joined())
                        .await;
                    return Err(RoomMessageError::NotJoined);
                }
            }
        };

        let notice = match style {
            MessageStyle::Say => Notice::room_message(&display_name, body),
            MessageStyle::Action => Notice::room_action(&display_name, body),
        };
        broadcast_to_room(
            self.repository.as_ref(),
            self.message_pusher.as_ref(),
            &notice,
        )
        .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NoticeKind;
    use crate::usecase::testing::{
        Delivery, RecordingMessagePusher, conn, create_test_repository, seat,
    };

    async fn create_usecase(
        trust_declared_nickname: bool,
    ) -> (SendRoomMessageUseCase, Arc<RecordingMessagePusher>) {
        let repository: Arc<dyn RoomRepository> = create_test_repository(10);
        seat(repository.as_ref(), &[("a", "alice"), ("b", "bob")]).await;
        let pusher = Arc::new(RecordingMessagePusher::default());
        let usecase =
            SendRoomMessageUseCase::new(repository, pusher.clone(), trust_declared_nickname);
        (usecase, pusher)
    }

    #[tokio::test]
    async fn test_say_uses_registered_nickname() {
        // テスト項目: 申告された名前ではなく登録済みの名前で発言が配信される
        // given (前提条件):
        let (usecase, pusher) = create_usecase(false).await;

        // when (操作):
        let result = usecase
            .execute(&conn("a"), "mallory", "hello", MessageStyle::Say)
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(
            pusher.deliveries(),
            vec![Delivery::Broadcast(
                vec![conn("a"), conn("b")],
                Notice::Chat {
                    message: "<alice> hello".to_string(),
                    kind: NoticeKind::ChatMsg,
                }
            )]
        );
    }

    #[tokio::test]
    async fn test_action_formats_with_asterisk() {
        // テスト項目: chat-action は "* nick body" 形式になる
        // given (前提条件):
        let (usecase, pusher) = create_usecase(false).await;

        // when (操作):
        usecase
            .execute(&conn("b"), "bob", "waves", MessageStyle::Action)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(
            pusher.deliveries(),
            vec![Delivery::Broadcast(
                vec![conn("a"), conn("b")],
                Notice::Chat {
                    message: "* bob waves".to_string(),
                    kind: NoticeKind::ChatAction,
                }
            )]
        );
    }

    #[tokio::test]
    async fn test_unjoined_sender_is_rejected() {
        // テスト項目: 参加していない送信者の発言は配信されない
        // given (前提条件):
        let (usecase, pusher) = create_usecase(false).await;

        // when (操作):
        let result = usecase
            .execute(&conn("ghost"), "ghost", "boo", MessageStyle::Say)
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(RoomMessageError::NotJoined));
        assert_eq!(
            pusher.deliveries(),
            vec![Delivery::To(conn("ghost"), Notice::not_joined())]
        );
    }

    #[tokio::test]
    async fn test_declared_nickname_is_used_when_trusted() {
        // テスト項目: 申告名を信頼する設定では申告された名前がそのまま使われる
        // given (前提条件):
        let (usecase, pusher) = create_usecase(true).await;

        // when (操作):
        usecase
            .execute(&conn("ghost"), "mallory", "hello", MessageStyle::Say)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(
            pusher.deliveries(),
            vec![Delivery::Broadcast(
                vec![conn("a"), conn("b")],
                Notice::room_message("mallory", "hello")
            )]
        );
    }
}
