//! WebSocket connection handlers.
//!
//! Each socket is split into a receive task that forwards parsed events to
//! the room event loop and a pusher task that drains the connection's
//! outbound channel. When either ends, the disconnect is forwarded too.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::SplitSink, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, ConnectionIdFactory, Outgoing},
    infrastructure::dto::websocket::ClientEvent,
    ui::{
        event_loop::{RoomCommand, RoomEvent},
        state::AppState,
    },
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let connection_id = ConnectionIdFactory::generate();
    ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id))
}

/// Parse one text frame into a room event
fn parse_frame(text: &str) -> RoomEvent {
    match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => RoomEvent::Inbound(event),
        Err(e) => {
            tracing::debug!("Malformed frame: {}", e);
            RoomEvent::Malformed
        }
    }
}

/// Spawns a task that forwards the connection's outbound channel to the socket.
///
/// `Outgoing::Close` sends a close frame and ends the task, which in turn
/// ends the connection.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<Outgoing>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(outgoing) = rx.recv().await {
            match outgoing {
                Outgoing::Text(text) => {
                    if sender.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Outgoing::Close => {
                    let _ = sender.send(Message::Close(None)).await;
                    break;
                }
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, connection_id: ConnectionId) {
    tracing::info!("Connection '{}' opened", connection_id);

    let (tx, rx) = mpsc::unbounded_channel();
    state
        .message_pusher
        .register_client(connection_id.clone(), tx)
        .await;

    let (sender, mut receiver) = socket.split();

    let commands = state.commands.clone();
    let recv_connection_id = connection_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", recv_connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received from '{}': {}", recv_connection_id, text.as_str());
                    let event = parse_frame(text.as_str());
                    if commands
                        .send(RoomCommand::new(recv_connection_id.clone(), event))
                        .is_err()
                    {
                        tracing::error!("Room event loop is gone, closing connection");
                        break;
                    }
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", recv_connection_id);
                    break;
                }
                // Ping/pong is answered by axum; binary frames are not part of the protocol
                _ => {}
            }
        }
    });

    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    tracing::info!("Connection '{}' closed", connection_id);
    if state
        .commands
        .send(RoomCommand::new(connection_id, RoomEvent::Disconnected))
        .is_err()
    {
        tracing::error!("Room event loop is gone, disconnect dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_join() {
        // テスト項目: join イベントのフレームが解釈される
        // given (前提条件):
        let text = r#"{"event":"join","nick":"alice"}"#;

        // when (操作):
        let event = parse_frame(text);

        // then (期待する結果):
        assert_eq!(
            event,
            RoomEvent::Inbound(ClientEvent::Join {
                nick: "alice".to_string()
            })
        );
    }

    #[test]
    fn test_parse_frame_missing_fields_default_to_empty() {
        // テスト項目: 欠けた文字列フィールドは空文字列として扱われる
        // given (前提条件):
        let text = r#"{"event":"pvt"}"#;

        // when (操作):
        let event = parse_frame(text);

        // then (期待する結果):
        assert_eq!(
            event,
            RoomEvent::Inbound(ClientEvent::Pvt {
                to: String::new(),
                message: String::new(),
            })
        );
    }

    #[test]
    fn test_parse_frame_malformed() {
        // テスト項目: JSON でないフレームや未知のイベントは Malformed になる
        // given (前提条件):
        let not_json = "hello";
        let unknown = r#"{"event":"dance"}"#;

        // when (操作):
        let first = parse_frame(not_json);
        let second = parse_frame(unknown);

        // then (期待する結果):
        assert_eq!(first, RoomEvent::Malformed);
        assert_eq!(second, RoomEvent::Malformed);
    }
}
