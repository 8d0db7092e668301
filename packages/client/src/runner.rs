//! Client execution logic with reconnection support.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use super::{
    domain::{ClientState, ReconnectTracker},
    error::ClientError,
    session::{SharedState, current_nick, run_client_session},
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Read lines on a blocking thread (rustyline is synchronous).
///
/// The thread lives across reconnects; the receiver closes on Ctrl+C or
/// Ctrl+D.
fn spawn_readline(state: SharedState) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            let prompt = format!("{}> ", current_nick(&state));
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}

/// Run the chat client with reconnection logic
///
/// Reconnects keep the nickname the server last assigned. Only consecutive
/// failures count towards the attempt limit.
pub async fn run_client(url: String, nick: String) -> Result<(), Box<dyn std::error::Error>> {
    let state: SharedState = Arc::new(Mutex::new(ClientState::new(nick)));
    let mut input_rx = spawn_readline(state.clone());
    let mut tracker = ReconnectTracker::new(MAX_RECONNECT_ATTEMPTS);

    loop {
        tracing::info!(
            "Attempting to connect to {} as '{}' (attempt {}/{})",
            url,
            current_nick(&state),
            tracker.attempt(),
            tracker.max_attempts()
        );

        let mut connected = false;
        let result = run_client_session(&url, &state, &mut input_rx, || connected = true).await;
        if connected {
            tracker.connected();
        }

        match result {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                break;
            }
            Err(ClientError::ClosedByServer) => {
                println!("\nDisconnected by the server.");
                break;
            }
            Err(e) => {
                tracing::warn!("Connection lost: {}", e);

                if !tracker.record_failure(&e) {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Exiting.",
                        tracker.max_attempts()
                    );
                    return Err(Box::new(e));
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    tracker.attempt(),
                    tracker.max_attempts()
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }

    Ok(())
}
