//! ユースケース層
//!
//! WebSocket の受信イベント 1 種につき 1 つのユースケースと、クイズセッションの進行役を定義します。

mod connect_participant;
mod create_room;
mod disconnect_participant;
mod error;
mod get_room_detail;
mod get_rooms;
mod join_room;
mod leave_room;
mod notify;
mod player_ready;
mod quiz_session;
mod submit_answer;

#[cfg(test)]
mod test_support;

pub use connect_participant::ConnectParticipantUseCase;
pub use create_room::CreateRoomUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{
    AnswerError, CreateRoomError, GetRoomDetailError, JoinRoomError, LeaveError, ReadyError,
};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::JoinRoomUseCase;
pub use leave_room::{LeaveOutcome, LeaveRoomUseCase};
pub use player_ready::{PlayerReadyUseCase, ReadyOutcome};
pub use quiz_session::{
    QUIZ_INTERRUPTED_MESSAGE, QUIZ_LOAD_FAILED_MESSAGE, QuizSessionRunner, StartOutcome,
};
pub use submit_answer::SubmitAnswerUseCase;
