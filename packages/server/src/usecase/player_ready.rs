//! UseCase: 準備完了
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - PlayerReadyUseCase::execute() メソッド
//! - 全員（2 人以上）が準備完了になった時だけセッションが 1 回開始されること
//!
//! ### どのような状況を想定しているか
//! - 正常系：2 人目の準備完了でクイズ開始
//! - エッジケース：1 人だけの Room、同時に届いた準備完了
//! - 異常系：参加していない Room への準備完了

use std::sync::Arc;

use crate::domain::{ConnectionId, CourseId, MessagePusher, RoomId, RoomRepository};

use super::{
    error::ReadyError,
    notify::broadcast_room_update,
    quiz_session::{QuizSessionRunner, StartOutcome},
};

/// 準備完了の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadyOutcome {
    /// まだ準備完了でない参加者がいる
    Waiting,
    /// この準備完了でクイズが始まった
    QuizStarted,
    /// 全員準備完了になったが問題セットを取得できなかった
    StartFailed,
}

/// 準備完了のユースケース
pub struct PlayerReadyUseCase {
    /// Repository（Room レジストリの抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// セッションの進行役
    runner: Arc<QuizSessionRunner>,
}

impl PlayerReadyUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        runner: Arc<QuizSessionRunner>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            runner,
        }
    }

    /// 準備完了を記録し、全員がそろえばセッションを開始する
    ///
    /// コース ID は Room で最初に指定されたものが使われる。
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
        course_id: Option<CourseId>,
    ) -> Result<ReadyOutcome, ReadyError> {
        let shared = self
            .repository
            .get_room(room_id)
            .await
            .ok_or_else(|| ReadyError::RoomNotFound(room_id.as_str().to_string()))?;

        let should_start = {
            let mut room = shared.lock().await;
            if room.is_retired() {
                return Err(ReadyError::RoomNotFound(room_id.as_str().to_string()));
            }
            room.mark_ready(connection_id, course_id)?;
            tracing::debug!("'{}' is ready in room '{}'", connection_id, room.id);
            broadcast_room_update(self.message_pusher.as_ref(), &room).await;
            room.try_begin_start()
        };

        if !should_start {
            return Ok(ReadyOutcome::Waiting);
        }

        tracing::info!("Everyone is ready in room '{}'", room_id);
        // 開始処理は接続のタスクから切り離す。呼び出し側が中断されても Room は Starting のまま残らない
        let runner = Arc::clone(&self.runner);
        let start = tokio::spawn(async move { runner.start(shared).await });
        Ok(match start.await {
            Ok(StartOutcome::Started) => ReadyOutcome::QuizStarted,
            Ok(StartOutcome::Failed(_)) => ReadyOutcome::StartFailed,
            Ok(StartOutcome::Abandoned) => ReadyOutcome::Waiting,
            Err(e) => {
                tracing::error!("Quiz start task for room '{}' failed: {}", room_id, e);
                ReadyOutcome::StartFailed
            }
        })
    }
}
