//! WebSocket event DTOs.
//!
//! Every frame is a JSON object `{"event": <name>, "data": <payload>}`.

use serde::{Deserialize, Serialize};

/// Events sent by clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ClientEvent {
    /// Create a room; acknowledged with `roomCreated`.
    CreateRoom { player_name: String },
    /// Join an existing room.
    JoinRoom { room_id: String, player_name: String },
    /// Leave the current room without closing the connection.
    LeaveRoom,
    /// Mark the sender ready, optionally proposing the course to play.
    PlayerReady {
        room_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        course_id: Option<String>,
    },
    /// Self-reported result for the question in flight.
    Answer {
        #[serde(default)]
        correct: bool,
    },
}

/// Public view of a participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub id: String,
    pub name: String,
    pub score: u32,
    pub ready: bool,
}

/// Events sent by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ServerEvent {
    RoomCreated { room_id: String },
    RoomUpdate { players: Vec<PlayerInfo> },
    StartQuiz {},
    Question { data: serde_json::Value, time: u64 },
    CoachMessage { text: String },
    QuizEnd(Vec<PlayerInfo>),
}
