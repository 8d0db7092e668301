//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{domain::MessagePusher, usecase::GetRoomStateUseCase};

use super::{
    event_loop::RoomEventLoop,
    handler::{get_room_state, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat room server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(event_loop, message_pusher, get_room_state_usecase);
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// 全ての接続のイベントを直列に処理するループ
    event_loop: RoomEventLoop,
    /// MessagePusher（接続ごとの送信チャンネルの登録先）
    message_pusher: Arc<dyn MessagePusher>,
    /// GetRoomStateUseCase（ルーム状態取得のユースケース）
    get_room_state_usecase: Arc<GetRoomStateUseCase>,
}

impl Server {
    pub fn new(
        event_loop: RoomEventLoop,
        message_pusher: Arc<dyn MessagePusher>,
        get_room_state_usecase: Arc<GetRoomStateUseCase>,
    ) -> Self {
        Self {
            event_loop,
            message_pusher,
            get_room_state_usecase,
        }
    }

    /// Bind to `host:port` and serve until Ctrl+C or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!(
            "WebSocket chat server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let (commands, event_loop_handle) = self.event_loop.spawn();
        let app_state = Arc::new(AppState {
            commands,
            message_pusher: self.message_pusher,
            get_room_state_usecase: self.get_room_state_usecase,
        });

        let result = axum::serve(listener, router(app_state))
            .with_graceful_shutdown(shutdown)
            .await;

        event_loop_handle.abort();
        result
    }
}

fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        // WebSocket エンドポイント
        .route("/ws", get(websocket_handler))
        // HTTP エンドポイント
        .route("/api/health", get(health_check))
        .route("/api/room", get(get_room_state))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
