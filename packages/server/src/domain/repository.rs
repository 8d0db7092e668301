//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! 複合的な更新（入室、改名、切断）はそれぞれ 1 回の呼び出しで完結し、
//! 実装はその間 Room への排他アクセスを保持しなければならない。

use async_trait::async_trait;

use super::{
    ConnectionId, Departure, GuestNumberSource, Nickname, Participant, RepositoryError, Room, Timestamp,
};

/// Room Repository trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Room のスナップショットを取得
    async fn get_room(&self) -> Result<Room, RepositoryError>;

    /// 参加者を入室させる（ニックネーム衝突の解決を含む）
    async fn admit_participant(
        &self,
        connection_id: ConnectionId,
        requested_nickname: &str,
        guest_numbers: &dyn GuestNumberSource,
        joined_at: Timestamp,
    ) -> Result<Participant, RepositoryError>;

    /// 接続の切断を反映する
    ///
    /// 満室判定、退室理由の取り出し、参加者の削除を 1 回のロックで行う。
    /// 接続の退室理由は結果にかかわらず破棄される。
    async fn depart_participant(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Departure, RepositoryError>;

    /// 接続 ID で参加者を検索
    async fn find_by_connection(&self, connection_id: &ConnectionId) -> Option<Participant>;

    /// ニックネームで参加者を検索（大文字小文字を区別しない）
    async fn find_by_nickname(&self, query: &str) -> Option<Participant>;

    /// 参加者のニックネームを変更し、変更前のニックネームを返す
    async fn rename_participant(
        &self,
        connection_id: &ConnectionId,
        nickname: Nickname,
    ) -> Result<Nickname, RepositoryError>;

    /// 参加順のニックネーム一覧
    async fn get_roster(&self) -> Vec<String>;

    /// 参加中の全ての接続 ID
    async fn get_all_connection_ids(&self) -> Vec<ConnectionId>;

    /// 退室理由を記録
    async fn record_quit_reason(&self, connection_id: &ConnectionId, reason: String);
}
