//! Terminal client for the live quiz server.
//!
//! Connects over WebSocket, reads slash commands at the prompt and prints the
//! room state, questions and rankings pushed by the server.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin ynity-client
//! cargo run --bin ynity-client -- --url ws://127.0.0.1:3000/ws
//! ```

use clap::Parser;

use ynity_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "ynity-client")]
#[command(about = "Terminal client for the live quiz server", long_about = None)]
struct Args {
    /// WebSocket server URL
    #[arg(short = 'u', long, env = "YNITY_SERVER_URL", default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = ynity_client::run_client(args.url).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
