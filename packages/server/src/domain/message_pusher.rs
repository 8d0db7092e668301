//! MessagePusher trait 定義
//!
//! 接続ごとの送信チャンネルへの通知のインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, Notice};

/// 接続の送信タスクへ渡されるフレーム
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outgoing {
    /// シリアライズ済みのイベント
    Text(String),
    /// 接続を閉じる指示
    Close,
}

/// 接続ごとの送信チャンネル
pub type PusherChannel = mpsc::UnboundedSender<Outgoing>;

/// MessagePusher trait
///
/// 送信は fire-and-forget。到達確認や再送は行わない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信チャンネルを登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続の送信チャンネルを登録解除
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 特定の接続に通知を送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        notice: &Notice,
    ) -> Result<(), MessagePushError>;

    /// 複数の接続に通知を送信（一部の送信失敗は許容）
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        notice: &Notice,
    ) -> Result<(), MessagePushError>;

    /// 接続を終了させる
    async fn terminate(&self, connection_id: &ConnectionId) -> Result<(), MessagePushError>;
}
