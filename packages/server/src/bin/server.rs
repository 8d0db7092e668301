//! WebSocket chat room server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin irori-server
//! cargo run --bin irori-server -- --host 0.0.0.0 --port 3000 --max-participants 20
//! ```

use clap::Parser;
use irori_server::{RoomSettings, build_server, domain::DEFAULT_MAX_PARTICIPANTS};
use irori_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "irori-server")]
#[command(about = "WebSocket chat room server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Maximum number of participants in the room
    #[arg(short = 'm', long, default_value_t = DEFAULT_MAX_PARTICIPANTS, value_parser = parse_max_participants)]
    max_participants: usize,

    /// Display the nickname clients declare in chat messages instead of the registered one
    #[arg(long)]
    trust_declared_nickname: bool,
}

fn parse_max_participants(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    let server = build_server(RoomSettings {
        max_participants: args.max_participants,
        trust_declared_nickname: args.trust_declared_nickname,
    });
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
