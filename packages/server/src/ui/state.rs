//! Shared application state.

use std::sync::Arc;

use crate::{
    config::LiveQuizConfig,
    domain::{MessagePusher, QuizContentClient, RoomRepository},
    usecase::{
        ConnectParticipantUseCase, CreateRoomUseCase, DisconnectParticipantUseCase,
        GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase, LeaveRoomUseCase,
        PlayerReadyUseCase, QuizSessionRunner, SubmitAnswerUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// 接続受け入れのユースケース
    pub connect_participant_usecase: ConnectParticipantUseCase,
    /// 切断のユースケース
    pub disconnect_participant_usecase: DisconnectParticipantUseCase,
    /// Room 作成のユースケース
    pub create_room_usecase: CreateRoomUseCase,
    /// Room 参加のユースケース
    pub join_room_usecase: JoinRoomUseCase,
    /// Room 退出のユースケース
    pub leave_room_usecase: LeaveRoomUseCase,
    /// 準備完了のユースケース
    pub player_ready_usecase: PlayerReadyUseCase,
    /// 回答のユースケース
    pub submit_answer_usecase: SubmitAnswerUseCase,
    /// Room 一覧取得のユースケース
    pub get_rooms_usecase: GetRoomsUseCase,
    /// Room 詳細取得のユースケース
    pub get_room_detail_usecase: GetRoomDetailUseCase,
}

impl AppState {
    /// Wire every use case onto the given adapters.
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        content_client: Arc<dyn QuizContentClient>,
        config: LiveQuizConfig,
    ) -> Self {
        let score_per_correct_answer = config.score_per_correct_answer;
        let runner = Arc::new(QuizSessionRunner::new(
            content_client,
            message_pusher.clone(),
            config,
        ));

        Self {
            connect_participant_usecase: ConnectParticipantUseCase::new(message_pusher.clone()),
            disconnect_participant_usecase: DisconnectParticipantUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            ),
            create_room_usecase: CreateRoomUseCase::new(repository.clone(), message_pusher.clone()),
            join_room_usecase: JoinRoomUseCase::new(repository.clone(), message_pusher.clone()),
            leave_room_usecase: LeaveRoomUseCase::new(repository.clone(), message_pusher.clone()),
            player_ready_usecase: PlayerReadyUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                runner,
            ),
            submit_answer_usecase: SubmitAnswerUseCase::new(
                repository.clone(),
                message_pusher,
                score_per_correct_answer,
            ),
            get_rooms_usecase: GetRoomsUseCase::new(repository.clone()),
            get_room_detail_usecase: GetRoomDetailUseCase::new(repository),
        }
    }
}
