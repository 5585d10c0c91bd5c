//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 切断時の Room からの退出と MessagePusher からの登録解除
//!
//! ### どのような状況を想定しているか
//! - 正常系：Room に参加中の接続の切断
//! - エッジケース：どの Room にも参加していない接続の切断
//! - エッジケース：出題中の切断（残りの参加者のセッションは続く）

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomRepository};

use super::leave_room::{LeaveOutcome, leave_current_room};

/// 切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（Room レジストリの抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 切断を実行
    ///
    /// 参加中の Room があれば退出させ、その結果を返す。
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<LeaveOutcome> {
        let outcome = leave_current_room(
            self.repository.as_ref(),
            self.message_pusher.as_ref(),
            connection_id,
        )
        .await;
        self.message_pusher.unregister_client(connection_id).await;
        tracing::info!("Connection '{}' disconnected", connection_id);
        outcome
    }
}
