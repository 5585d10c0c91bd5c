//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Room summary for the room list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub id: String,
    pub players: Vec<String>,
    pub phase: String,
    pub created_at: String,
}

/// Participant detail
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDetailDto {
    pub id: String,
    pub name: String,
    pub score: u32,
    pub ready: bool,
    pub joined_at: String,
}

/// Room detail
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailDto {
    pub id: String,
    pub course_id: Option<String>,
    pub phase: String,
    pub current_question: Option<usize>,
    pub total_questions: Option<usize>,
    pub players: Vec<ParticipantDetailDto>,
    pub created_at: String,
}
