//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `PusherChannel` を管理
//! - `Notice` を JSON にシリアライズして送信（push_to, broadcast）
//! - 接続の終了指示（terminate）
//!
//! WebSocket の生成と送信タスクは UI 層（`ui/handler/websocket.rs`）が担当し、
//! この実装はチャンネルの送信側だけを扱います。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, Notice, Outgoing, PusherChannel},
    infrastructure::dto::websocket::ServerEvent,
};

/// WebSocket を使った MessagePusher 実装
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの送信チャンネル
    ///
    /// Key: connection_id (String)
    clients: Arc<Mutex<HashMap<String, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new(clients: Arc<Mutex<HashMap<String, PusherChannel>>>) -> Self {
        Self { clients }
    }

    fn encode(notice: &Notice) -> Result<String, MessagePushError> {
        serde_json::to_string(&ServerEvent::from(notice.clone()))
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
        clients.insert(connection_id.into_string(), sender);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        if clients.remove(connection_id.as_str()).is_some() {
            tracing::debug!(
                "Connection '{}' unregistered from MessagePusher",
                connection_id
            );
        }
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        notice: &Notice,
    ) -> Result<(), MessagePushError> {
        let payload = Self::encode(notice)?;
        let clients = self.clients.lock().await;

        let sender = clients
            .get(connection_id.as_str())
            .ok_or_else(|| MessagePushError::ClientNotFound(connection_id.to_string()))?;
        sender
            .send(Outgoing::Text(payload))
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to connection '{}'", connection_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        notice: &Notice,
    ) -> Result<(), MessagePushError> {
        let payload = Self::encode(notice)?;
        let clients = self.clients.lock().await;

        for target in targets {
            match clients.get(target.as_str()) {
                Some(sender) => {
                    // ブロードキャストでは一部の送信失敗を許容
                    if let Err(e) = sender.send(Outgoing::Text(payload.clone())) {
                        tracing::warn!("Failed to push message to connection '{}': {}", target, e);
                    }
                }
                None => {
                    tracing::warn!(
                        "Connection '{}' not found during broadcast, skipping",
                        target
                    );
                }
            }
        }

        Ok(())
    }

    async fn terminate(&self, connection_id: &ConnectionId) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;
        let sender = clients
            .get(connection_id.as_str())
            .ok_or_else(|| MessagePushError::ClientNotFound(connection_id.to_string()))?;
        sender
            .send(Outgoing::Close)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Requested close of connection '{}'", connection_id);
        Ok(())
    }
}
