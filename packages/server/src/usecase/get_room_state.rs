//! UseCase: ルーム状態の取得（HTTP API 用）

use std::sync::Arc;

use crate::domain::{Room, RoomRepository};

use super::error::GetRoomStateError;

/// ルーム状態取得のユースケース
pub struct GetRoomStateUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomStateUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// Room のスナップショットを返す
    pub async fn execute(&self) -> Result<Room, GetRoomStateError> {
        Ok(self.repository.get_room().await?)
    }
}
