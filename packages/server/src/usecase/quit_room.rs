//! UseCase: 退室要求
//!
//! 参加者の削除は行わない。接続を終了させ、後続の切断処理に任せる。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, Notice, RoomRepository};

use super::notify::{push_or_warn, terminate_or_warn};

/// 退室要求のユースケース
pub struct QuitRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl QuitRoomUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 退室理由を記録し、本人に通知してから接続を終了させる
    pub async fn execute(&self, connection_id: &ConnectionId, reason: String) {
        tracing::info!("Connection '{}' requested quit", connection_id);
        let notice = Notice::disconnected(Some(reason.as_str()));
        self.repository
            .record_quit_reason(connection_id, reason)
            .await;

        let pusher = self.message_pusher.as_ref();
        push_or_warn(pusher, connection_id, &notice).await;
        terminate_or_warn(pusher, connection_id).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NoticeKind;
    use crate::usecase::testing::{
        Delivery, RecordingMessagePusher, conn, create_test_repository, pending_quit_reason, seat,
    };

    #[tokio::test]
    async fn test_quit_with_reason() {
        // テスト項目: 理由付きの quit で本人に通知され、接続が終了される
        // given (前提条件):
        let repository: Arc<dyn RoomRepository> = create_test_repository(10);
        let pusher = Arc::new(RecordingMessagePusher::default());
        seat(repository.as_ref(), &[("b", "bob")]).await;
        let usecase = QuitRoomUseCase::new(repository.clone(), pusher.clone());

        // when (操作):
        usecase.execute(&conn("b"), "brb".to_string()).await;

        // then (期待する結果):
        assert_eq!(
            pusher.deliveries(),
            vec![
                Delivery::To(
                    conn("b"),
                    Notice::Chat {
                        message: "* you have been disconnected (\"brb\")".to_string(),
                        kind: NoticeKind::Quit,
                    }
                ),
                Delivery::Terminate(conn("b")),
            ]
        );
        // 参加者はまだ削除されない
        assert_eq!(repository.get_roster().await, vec!["bob"]);
        assert_eq!(
            pending_quit_reason(repository.as_ref(), "b").await,
            Some("brb".to_string())
        );
    }

    #[tokio::test]
    async fn test_quit_without_reason() {
        // テスト項目: 理由なしの quit は理由を含まない通知になる
        // given (前提条件):
        let repository: Arc<dyn RoomRepository> = create_test_repository(10);
        let pusher = Arc::new(RecordingMessagePusher::default());
        let usecase = QuitRoomUseCase::new(repository, pusher.clone());

        // when (操作):
        usecase.execute(&conn("b"), String::new()).await;

        // then (期待する結果):
        assert_eq!(
            pusher.deliveries()[0],
            Delivery::To(conn("b"), Notice::disconnected(None))
        );
    }
}
