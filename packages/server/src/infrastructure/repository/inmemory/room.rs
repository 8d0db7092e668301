//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! `Room` ドメインモデルを `tokio::sync::Mutex` で保護して保持します。
//! 各メソッドはロックを 1 回だけ取得し、その間に操作を完結させます。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, Departure, GuestNumberSource, Nickname, Participant, RepositoryError, Room,
    RoomRepository, Timestamp,
};

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    /// Room ドメインモデル
    room: Arc<Mutex<Room>>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new(room: Arc<Mutex<Room>>) -> Self {
        Self { room }
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn get_room(&self) -> Result<Room, RepositoryError> {
        let room = self.room.lock().await;
        Ok(room.clone())
    }

    async fn admit_participant(
        &self,
        connection_id: ConnectionId,
        requested_nickname: &str,
        guest_numbers: &dyn GuestNumberSource,
        joined_at: Timestamp,
    ) -> Result<Participant, RepositoryError> {
        let mut room = self.room.lock().await;
        Ok(room.admit(connection_id, requested_nickname, guest_numbers, joined_at)?)
    }

    async fn depart_participant(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Departure, RepositoryError> {
        let mut room = self.room.lock().await;
        Ok(room.depart(connection_id)?)
    }

    async fn find_by_connection(&self, connection_id: &ConnectionId) -> Option<Participant> {
        let room = self.room.lock().await;
        room.find_by_connection(connection_id).cloned()
    }

    async fn find_by_nickname(&self, query: &str) -> Option<Participant> {
        let room = self.room.lock().await;
        room.find_by_nickname(query).cloned()
    }

    async fn rename_participant(
        &self,
        connection_id: &ConnectionId,
        nickname: Nickname,
    ) -> Result<Nickname, RepositoryError> {
        let mut room = self.room.lock().await;
        Ok(room.rename(connection_id, nickname)?)
    }

    async fn get_roster(&self) -> Vec<String> {
        self.room.lock().await.roster()
    }

    async fn get_all_connection_ids(&self) -> Vec<ConnectionId> {
        self.room.lock().await.connection_ids()
    }

    async fn record_quit_reason(&self, connection_id: &ConnectionId, reason: String) {
        let mut room = self.room.lock().await;
        room.record_quit_reason(connection_id.clone(), reason);
    }
}
