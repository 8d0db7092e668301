//! CLI chat client for the Irori chat room server.
//!
//! Connects, joins with the given nickname and sends each input line to the
//! room. Slash commands: `/nick`, `/whois`, `/msg`, `/me`, `/quit`, `/users`.
//! Reconnects on connection loss (max 5 attempts with 5 second interval),
//! but not after the server closed the connection.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin irori-client -- --nick alice
//! cargo run --bin irori-client -- -n bob -u ws://127.0.0.1:3000/ws
//! ```

use clap::Parser;
use irori_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "irori-client")]
#[command(about = "CLI chat client for the Irori chat room server", long_about = None)]
struct Args {
    /// Nickname to join with (the server may assign a guest name instead)
    #[arg(short = 'n', long)]
    nick: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = irori_client::run_client(args.url, args.nick).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
