//! UseCase: Room からの退出
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveRoomUseCase::execute() メソッド
//! - 退出後の残りの参加者への通知と、空になった Room の削除
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者が残る退出、最後の 1 人の退出
//! - 異常系：どの Room にも参加していない接続の退出

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomId, RoomRepository};

use super::{error::LeaveError, notify::broadcast_room_update};

/// 退出の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// 退出した。Room には `remaining` 人が残っている
    Left { room_id: RoomId, remaining: usize },
    /// 最後の参加者が退出したので Room を削除した
    RoomDeleted { room_id: RoomId },
}

/// 接続が参加中の Room から退出させる
///
/// 参加していなければ `None`。明示的な退出・切断・別 Room への移動で共通に使う。
pub(crate) async fn leave_current_room(
    repository: &dyn RoomRepository,
    message_pusher: &dyn MessagePusher,
    connection_id: &ConnectionId,
) -> Option<LeaveOutcome> {
    let shared = repository.find_room_by_participant(connection_id).await?;
    let mut room = shared.lock().await;

    repository.unbind_participant(connection_id).await;
    room.remove_participant(connection_id)?;

    if room.is_empty() {
        room.retire();
        repository.delete_room(&room.id).await;
        tracing::info!("Room '{}' is empty and has been deleted", room.id);
        return Some(LeaveOutcome::RoomDeleted {
            room_id: room.id.clone(),
        });
    }

    tracing::info!(
        "'{}' left room '{}' ({} remaining)",
        connection_id,
        room.id,
        room.len()
    );
    broadcast_room_update(message_pusher, &room).await;
    Some(LeaveOutcome::Left {
        room_id: room.id.clone(),
        remaining: room.len(),
    })
}

/// Room 退出のユースケース
pub struct LeaveRoomUseCase {
    /// Repository（Room レジストリの抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveRoomUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 退出を実行
    pub async fn execute(&self, connection_id: &ConnectionId) -> Result<LeaveOutcome, LeaveError> {
        leave_current_room(
            self.repository.as_ref(),
            self.message_pusher.as_ref(),
            connection_id,
        )
        .await
        .ok_or_else(|| LeaveError::NotInRoom(connection_id.as_str().to_string()))
    }
}
