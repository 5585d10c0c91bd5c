//! Error types for the quiz client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The server refused the WebSocket handshake
    #[error("Server rejected the connection with HTTP {0}")]
    HandshakeRejected(u16),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The typed line is not a valid command
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// The command needs a room but the client is not in one
    #[error("Not in a room yet: /create or /join first")]
    NotInRoom,
}
