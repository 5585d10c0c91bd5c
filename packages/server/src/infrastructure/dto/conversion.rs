//! Conversion logic between domain models and DTOs.

use ynity_shared::time::timestamp_to_rfc3339;

use crate::domain::{Participant, PlayerSnapshot, RoomEvent, RoomView};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain → WebSocket DTO
// ========================================

impl From<&PlayerSnapshot> for dto::PlayerInfo {
    fn from(player: &PlayerSnapshot) -> Self {
        Self {
            id: player.id.as_str().to_string(),
            name: player.name.as_str().to_string(),
            score: player.score,
            ready: player.ready,
        }
    }
}

fn players(players: &[PlayerSnapshot]) -> Vec<dto::PlayerInfo> {
    players.iter().map(dto::PlayerInfo::from).collect()
}

impl From<&RoomEvent> for dto::ServerEvent {
    fn from(event: &RoomEvent) -> Self {
        match event {
            RoomEvent::RoomCreated { room_id } => Self::RoomCreated {
                room_id: room_id.as_str().to_string(),
            },
            RoomEvent::RoomUpdate { players: snapshot } => Self::RoomUpdate {
                players: players(snapshot),
            },
            RoomEvent::StartQuiz => Self::StartQuiz {},
            RoomEvent::Question {
                question,
                time_secs,
            } => Self::Question {
                data: question.as_value().clone(),
                time: *time_secs,
            },
            RoomEvent::CoachMessage { text } => Self::CoachMessage { text: text.clone() },
            RoomEvent::QuizEnd { ranking } => Self::QuizEnd(players(ranking)),
        }
    }
}

// ========================================
// Domain → HTTP DTO
// ========================================

impl From<&Participant> for http::ParticipantDetailDto {
    fn from(participant: &Participant) -> Self {
        Self {
            id: participant.id.as_str().to_string(),
            name: participant.name.as_str().to_string(),
            score: participant.score,
            ready: participant.ready,
            joined_at: timestamp_to_rfc3339(participant.joined_at.value()),
        }
    }
}

impl From<&RoomView> for http::RoomSummaryDto {
    fn from(room: &RoomView) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            players: room
                .participants
                .iter()
                .map(|p| p.name.as_str().to_string())
                .collect(),
            phase: room.phase.as_str().to_string(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}

impl From<&RoomView> for http::RoomDetailDto {
    fn from(room: &RoomView) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            course_id: room.course_id.as_ref().map(|c| c.as_str().to_string()),
            phase: room.phase.as_str().to_string(),
            current_question: room.current_question,
            total_questions: room.total_questions,
            players: room
                .participants
                .iter()
                .map(http::ParticipantDetailDto::from)
                .collect(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}
