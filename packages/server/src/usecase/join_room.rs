//! UseCase: Room への参加
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 参加後に Room の全員へ roomUpdate が届くこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：既存の Room への参加
//! - 異常系：存在しない Room・同じ Room への再参加
//! - エッジケース：削除済みの Room への参加

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, Participant, PlayerName, RoomId, RoomRepository, Timestamp,
};
use ynity_shared::time::get_utc_timestamp;

use super::{error::JoinRoomError, leave_room::leave_current_room, notify::broadcast_room_update};

/// Room 参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（Room レジストリの抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinRoomUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Room に参加する
    ///
    /// 別の Room に参加中なら先にそこから退出する。
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        room_id: RoomId,
        player_name: PlayerName,
    ) -> Result<(), JoinRoomError> {
        let not_found = || JoinRoomError::RoomNotFound(room_id.as_str().to_string());
        let shared = self
            .repository
            .get_room(&room_id)
            .await
            .ok_or_else(not_found)?;

        if let Some(current) = self
            .repository
            .find_room_by_participant(&connection_id)
            .await
        {
            if Arc::ptr_eq(&current, &shared) {
                return Err(JoinRoomError::AlreadyInRoom(room_id.as_str().to_string()));
            }
            leave_current_room(
                self.repository.as_ref(),
                self.message_pusher.as_ref(),
                &connection_id,
            )
            .await;
        }

        let mut room = shared.lock().await;
        if room.is_retired() {
            return Err(not_found());
        }
        let participant = Participant::new(
            connection_id.clone(),
            player_name,
            Timestamp::new(get_utc_timestamp()),
        );
        room.add_participant(participant)?;
        self.repository
            .bind_participant(connection_id.clone(), room.id.clone())
            .await;

        tracing::info!(
            "'{}' joined room '{}' ({} participants)",
            connection_id,
            room.id,
            room.len()
        );
        broadcast_room_update(self.message_pusher.as_ref(), &room).await;
        Ok(())
    }
}
