//! WebSocket client session management.

use std::sync::{Arc, Mutex};

use futures_util::{SinkExt, StreamExt};
use irori_server::infrastructure::dto::websocket::{ClientEvent, ServerEvent};
use irori_shared::time::get_jst_timestamp;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{
    command::{Command, parse_input},
    domain::ClientState,
    error::ClientError,
};

use super::{formatter::MessageFormatter, ui::redisplay_prompt};

/// Client state shared by the reader, the writer and the prompt thread
pub type SharedState = Arc<Mutex<ClientState>>;

pub fn current_nick(state: &SharedState) -> String {
    state
        .lock()
        .map(|s| s.nick().to_string())
        .unwrap_or_default()
}

fn current_roster(state: &SharedState) -> Vec<String> {
    state
        .lock()
        .map(|s| s.roster().to_vec())
        .unwrap_or_default()
}

fn to_frame(event: &ClientEvent) -> Result<Message, ClientError> {
    serde_json::to_string(event)
        .map(|json| Message::Text(json.into()))
        .map_err(|e| ClientError::ConnectionError(e.to_string()))
}

/// Run one WebSocket session: join, then relay input lines and server events.
///
/// `on_connected` runs once the WebSocket handshake has succeeded.
///
/// # Returns
///
/// * `Ok(())` - the user ended input (Ctrl+C / Ctrl+D)
/// * `Err(ClientError::ClosedByServer)` - the server closed the connection
/// * `Err(ClientError::ConnectionError)` - the connection failed or was lost
pub async fn run_client_session(
    url: &str,
    state: &SharedState,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
    on_connected: impl FnOnce(),
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to chat server!");
    on_connected();
    let (mut write, mut read) = ws_stream.split();

    let join = ClientEvent::Join {
        nick: current_nick(state),
    };
    write
        .send(to_frame(&join)?)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    println!("\nType messages and press Enter to send. /quit to leave, Ctrl+C to exit.\n");

    // Spawn a task to handle incoming messages
    let read_state = state.clone();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match serde_json::from_str::<ServerEvent>(text.as_str()) {
                        Ok(event) => {
                            if let Ok(mut state) = read_state.lock() {
                                state.apply(&event);
                            }
                            let own_nick = current_nick(&read_state);
                            MessageFormatter::format_server_event(
                                &event,
                                &own_nick,
                                get_jst_timestamp(),
                            )
                        }
                        Err(_) => MessageFormatter::format_raw_message(text.as_str()),
                    };
                    print!("{}", formatted);
                    redisplay_prompt(&current_nick(&read_state));
                }
                Ok(Message::Binary(data)) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt(&current_nick(&read_state));
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    return Err(ClientError::ClosedByServer);
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return Err(ClientError::ConnectionError(e.to_string()));
                }
                _ => {}
            }
        }
        Err(ClientError::ConnectionError("Connection lost".to_string()))
    });

    // Relay input lines to the server until the user stops typing
    let write_loop = async {
        while let Some(line) = input_rx.recv().await {
            match parse_input(&line, &current_nick(state)) {
                Command::ShowUsers => {
                    let users = current_roster(state);
                    let own_nick = current_nick(state);
                    print!("{}", MessageFormatter::format_users(&users, &own_nick));
                    redisplay_prompt(&own_nick);
                }
                Command::Send(event) => {
                    if let Err(e) = write.send(to_frame(&event)?).await {
                        tracing::warn!("Failed to send message: {}", e);
                        return Err(ClientError::ConnectionError(e.to_string()));
                    }
                }
            }
        }
        let _ = write.close().await;
        Ok::<(), ClientError>(())
    };

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => match read_result {
            Ok(result) => result,
            Err(e) => Err(ClientError::ConnectionError(e.to_string())),
        },
        write_result = write_loop => {
            read_task.abort();
            write_result
        }
    }
}
