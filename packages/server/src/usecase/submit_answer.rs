//! UseCase: 回答
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SubmitAnswerUseCase::execute() メソッド
//! - 正解 1 回につき設定された点数が加算され、roomUpdate が配信されること
//!
//! ### どのような状況を想定しているか
//! - 正常系：受付中の正解・不正解
//! - エッジケース：同じ問題への 2 回目の正解、受付時間外の回答
//! - エッジケース：他の参加者が切断してもスコアは変わらない

use std::sync::Arc;

use crate::domain::{AnswerOutcome, ConnectionId, MessagePusher, RoomRepository};

use super::{error::AnswerError, notify::broadcast_room_update};

/// 回答のユースケース
pub struct SubmitAnswerUseCase {
    /// Repository（Room レジストリの抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 正解 1 回あたりの点数
    score_per_correct_answer: u32,
}

impl SubmitAnswerUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        score_per_correct_answer: u32,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            score_per_correct_answer,
        }
    }

    /// 送信者が参加中の Room で回答を処理する
    ///
    /// 得点した場合のみ roomUpdate を配信する。
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        correct: bool,
    ) -> Result<AnswerOutcome, AnswerError> {
        let shared = self
            .repository
            .find_room_by_participant(connection_id)
            .await
            .ok_or_else(|| AnswerError::NotInRoom(connection_id.as_str().to_string()))?;
        let mut room = shared.lock().await;

        let outcome = room.record_answer(connection_id, correct, self.score_per_correct_answer)?;
        tracing::debug!(
            "Answer from '{}' in room '{}': {:?}",
            connection_id,
            room.id,
            outcome
        );
        if let AnswerOutcome::Scored { .. } = outcome {
            broadcast_room_update(self.message_pusher.as_ref(), &room).await;
        }
        Ok(outcome)
    }
}
