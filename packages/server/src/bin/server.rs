//! Live multiplayer quiz server.
//!
//! Players create or join rooms over WebSocket, ready up, and play a paced quiz
//! whose questions come from the external content service.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin ynity-server
//! cargo run --bin ynity-server -- --host 0.0.0.0 --port 3000 --content-service-url http://quiz:8000
//! ```

use std::{sync::Arc, time::Duration};

use clap::Parser;
use ynity_server::{
    config::{
        ContentServiceConfig, DEFAULT_ANSWER_WINDOW_SECS, DEFAULT_CONTENT_SERVICE_URL,
        DEFAULT_CONTENT_TIMEOUT_SECS, DEFAULT_CORS_ORIGIN, DEFAULT_SCORE_PER_CORRECT_ANSWER,
        LiveQuizConfig,
    },
    infrastructure::{
        message_pusher::WebSocketMessagePusher, quiz_content::HttpQuizContentClient,
        repository::InMemoryRoomRepository,
    },
    ui::{AppState, Server},
};
use ynity_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "ynity-server")]
#[command(about = "Live multiplayer quiz server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "YNITY_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "YNITY_PORT", default_value_t = 8080)]
    port: u16,

    /// Base URL of the quiz content service
    #[arg(long, env = "YNITY_CONTENT_SERVICE_URL", default_value = DEFAULT_CONTENT_SERVICE_URL)]
    content_service_url: String,

    /// Seconds each question stays open for answers
    #[arg(long, env = "YNITY_ANSWER_WINDOW_SECS", default_value_t = DEFAULT_ANSWER_WINDOW_SECS)]
    answer_window_secs: u64,

    /// Points awarded per correct answer
    #[arg(long, env = "YNITY_SCORE_PER_CORRECT_ANSWER", default_value_t = DEFAULT_SCORE_PER_CORRECT_ANSWER)]
    score_per_correct_answer: u32,

    /// Request timeout for the quiz content service, in seconds
    #[arg(long, env = "YNITY_CONTENT_TIMEOUT_SECS", default_value_t = DEFAULT_CONTENT_TIMEOUT_SECS)]
    content_timeout_secs: u64,

    /// Browser origin allowed to call the HTTP API
    #[arg(long, env = "YNITY_CORS_ORIGIN", default_value = DEFAULT_CORS_ORIGIN)]
    cors_origin: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. QuizContentClient
    // 4. AppState (UseCases)
    // 5. Server

    // 1. Create Repository (in-memory room registry)
    let repository = Arc::new(InMemoryRoomRepository::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create QuizContentClient (HTTP implementation)
    let content_config = ContentServiceConfig {
        base_url: args.content_service_url,
        request_timeout: Duration::from_secs(args.content_timeout_secs),
    };
    let content_client = match HttpQuizContentClient::new(&content_config) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!("Failed to build content service client: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("Quiz content service: {}", content_config.base_url);

    // 4. Create AppState
    let quiz_config = LiveQuizConfig {
        answer_window: Duration::from_secs(args.answer_window_secs),
        score_per_correct_answer: args.score_per_correct_answer,
    };
    let state = AppState::new(repository, message_pusher, content_client, quiz_config);

    // 5. Create and run the server
    let server = match Server::new(state).with_cors_origin(&args.cors_origin) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Invalid CORS origin '{}': {}", args.cors_origin, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
