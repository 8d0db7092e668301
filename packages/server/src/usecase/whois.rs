//! UseCase: whois（ニックネームから接続 ID を調べる）

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, Notice, Participant, RoomRepository};

use super::notify::push_or_warn;

/// whois のユースケース
pub struct WhoisUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl WhoisUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 大文字小文字を区別せずに検索し、結果を要求者にだけ通知する
    pub async fn execute(&self, requester: &ConnectionId, query: &str) -> Option<Participant> {
        let found = self.repository.find_by_nickname(query).await;
        let notice = match &found {
            Some(participant) => Notice::whois_found(participant),
            None => Notice::whois_not_found(query),
        };
        push_or_warn(self.message_pusher.as_ref(), requester, &notice).await;
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NoticeKind, message_pusher::MockMessagePusher};
    use crate::usecase::testing::{conn, create_test_repository, seat};
    use mockall::predicate::*;

    #[tokio::test]
    async fn test_whois_found_ignores_case() {
        // テスト項目: 大文字小文字が違っても見つかり、要求者にだけ通知される
        // given (前提条件):
        let repository: Arc<dyn RoomRepository> = create_test_repository(10);
        seat(repository.as_ref(), &[("id-alice", "Alice"), ("id-bob", "bob")]).await;

        let mut mock_pusher = MockMessagePusher::new();
        mock_pusher
            .expect_push_to()
            .with(
                eq(conn("id-bob")),
                eq(Notice::Chat {
                    message: "* whois: 'Alice' id: id-alice".to_string(),
                    kind: NoticeKind::System,
                }),
            )
            .times(1)
            .returning(|_, _| Ok(()));
        mock_pusher.expect_broadcast().times(0);

        let usecase = WhoisUseCase::new(repository, Arc::new(mock_pusher));

        // when (操作):
        let found = usecase.execute(&conn("id-bob"), "alice").await;

        // then (期待する結果):
        assert_eq!(found.map(|p| p.connection_id), Some(conn("id-alice")));
    }

    #[tokio::test]
    async fn test_whois_not_found() {
        // テスト項目: 見つからない場合は検索文字列をそのまま含む通知になる
        // given (前提条件):
        let repository: Arc<dyn RoomRepository> = create_test_repository(10);
        seat(repository.as_ref(), &[("id-bob", "bob")]).await;

        let mut mock_pusher = MockMessagePusher::new();
        mock_pusher
            .expect_push_to()
            .with(
                eq(conn("id-bob")),
                eq(Notice::whois_not_found("Nobody")),
            )
            .times(1)
            .returning(|_, _| Ok(()));

        let usecase = WhoisUseCase::new(repository, Arc::new(mock_pusher));

        // when (操作):
        let found = usecase.execute(&conn("id-bob"), "Nobody").await;

        // then (期待する結果):
        assert!(found.is_none());
    }
}
