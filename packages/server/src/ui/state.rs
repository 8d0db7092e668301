//! Shared state of the HTTP/WebSocket handlers.

use std::sync::Arc;

use crate::{domain::MessagePusher, usecase::GetRoomStateUseCase};

use super::event_loop::CommandSender;

/// Shared application state
pub struct AppState {
    /// イベントループへの入口（全ての接続で共有）
    pub commands: CommandSender,
    /// MessagePusher（接続ごとの送信チャンネルの登録先）
    pub message_pusher: Arc<dyn MessagePusher>,
    /// GetRoomStateUseCase（ルーム状態取得のユースケース）
    pub get_room_state_usecase: Arc<GetRoomStateUseCase>,
}
