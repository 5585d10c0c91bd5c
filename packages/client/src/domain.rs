//! Domain logic for client-side operations.
//!
//! Pure functions and state kept free of I/O so they are easy to test.

use ynity_server::infrastructure::dto::websocket::ServerEvent;

use crate::{command::Command, error::ClientError};

/// Check if the client should exit immediately based on the error type.
///
/// A rejected handshake will not succeed on retry.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::HandshakeRejected(_))
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }
    current_attempt < max_attempts
}

/// What the client believes about its own room membership.
///
/// The server never echoes the room id after a join, so the id typed in
/// `/join` is trusted until the next `/leave`, `/create` or reconnect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub room_id: Option<String>,
    pub player_name: Option<String>,
}

impl SessionState {
    /// Update after a command was sent.
    pub fn on_command(&mut self, command: &Command) {
        match command {
            Command::Create { player_name } => {
                self.room_id = None;
                self.player_name = Some(player_name.clone());
            }
            Command::Join {
                room_id,
                player_name,
            } => {
                self.room_id = Some(room_id.clone());
                self.player_name = Some(player_name.clone());
            }
            Command::Leave => self.room_id = None,
            Command::Ready { .. } | Command::Answer { .. } | Command::Help => {}
        }
    }

    /// Update after an event arrived from the server.
    pub fn on_event(&mut self, event: &ServerEvent) {
        if let ServerEvent::RoomCreated { room_id } = event {
            self.room_id = Some(room_id.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_exit_immediately_with_rejected_handshake() {
        // テスト項目: ハンドシェイクを拒否された場合、即座に終了すべきと判定される
        // given (前提条件):
        let error = ClientError::HandshakeRejected(403);

        // when (操作):
        let result = should_exit_immediately(&error);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_should_attempt_reconnect_within_limit() {
        // テスト項目: 再接続回数が上限未満の場合、再接続すべきと判定される
        // given (前提条件):
        let error = ClientError::ConnectionError("network error".to_string());

        // when (操作) / then (期待する結果):
        assert!(should_attempt_reconnect(&error, 0, 5));
        assert!(should_attempt_reconnect(&error, 4, 5));
    }

    #[test]
    fn test_should_attempt_reconnect_at_limit() {
        // テスト項目: 再接続回数が上限に達した場合、または拒否された場合は再接続しない
        // given (前提条件):
        let error = ClientError::ConnectionError("network error".to_string());

        // when (操作) / then (期待する結果):
        assert!(!should_attempt_reconnect(&error, 5, 5));
        assert!(!should_attempt_reconnect(
            &ClientError::HandshakeRejected(400),
            0,
            5
        ));
    }

    #[test]
    fn test_session_state_tracks_created_room() {
        // テスト項目: /create の後、roomCreated で Room ID を覚える
        // given (前提条件):
        let mut state = SessionState::default();

        // when (操作):
        state.on_command(&Command::Create {
            player_name: "alice".to_string(),
        });
        state.on_event(&ServerEvent::RoomCreated {
            room_id: "k3x9qa".to_string(),
        });

        // then (期待する結果):
        assert_eq!(state.room_id.as_deref(), Some("k3x9qa"));
        assert_eq!(state.player_name.as_deref(), Some("alice"));
    }

    #[test]
    fn test_session_state_join_and_leave() {
        // テスト項目: /join で Room ID を覚え、/leave で忘れる
        // given (前提条件):
        let mut state = SessionState::default();
        state.on_command(&Command::Join {
            room_id: "abc123".to_string(),
            player_name: "bob".to_string(),
        });
        assert_eq!(state.room_id.as_deref(), Some("abc123"));

        // when (操作):
        state.on_command(&Command::Leave);

        // then (期待する結果):
        assert_eq!(state.room_id, None);
        assert_eq!(state.player_name.as_deref(), Some("bob"));
    }
}
