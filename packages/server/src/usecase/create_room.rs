//! UseCase: Room の作成
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CreateRoomUseCase::execute() メソッド
//! - 作成者への roomCreated 通知と roomUpdate の配信
//!
//! ### どのような状況を想定しているか
//! - 正常系：Room 未参加の接続による作成
//! - エッジケース：別の Room に参加中の接続による作成（元の Room から退出する）

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, Participant, PlayerName, RoomEvent, RoomId, RoomRepository,
    Timestamp,
};
use ynity_shared::time::get_utc_timestamp;

use super::{
    error::CreateRoomError,
    leave_room::leave_current_room,
    notify::{broadcast_room_update, push_to},
};

/// Room 作成のユースケース
pub struct CreateRoomUseCase {
    /// Repository（Room レジストリの抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl CreateRoomUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 新しい Room を作成し、作成者を最初の参加者として登録する
    ///
    /// # Returns
    ///
    /// * `Ok(RoomId)` - 作成された Room の ID
    /// * `Err(CreateRoomError)` - Room ID を払い出せなかった
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        player_name: PlayerName,
    ) -> Result<RoomId, CreateRoomError> {
        leave_current_room(
            self.repository.as_ref(),
            self.message_pusher.as_ref(),
            &connection_id,
        )
        .await;

        let now = Timestamp::new(get_utc_timestamp());
        let creator = Participant::new(connection_id.clone(), player_name, now);
        let shared = self.repository.create_room(creator, now).await?;
        let room = shared.lock().await;

        tracing::info!("Room '{}' created by '{}'", room.id, connection_id);
        push_to(
            self.message_pusher.as_ref(),
            &connection_id,
            RoomEvent::RoomCreated {
                room_id: room.id.clone(),
            },
        )
        .await;
        broadcast_room_update(self.message_pusher.as_ref(), &room).await;

        Ok(room.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        infrastructure::repository::InMemoryRoomRepository,
        usecase::test_support::{RecordingPusher, conn, seed_room},
    };

    #[tokio::test]
    async fn test_create_room_registers_creator() {
        // テスト項目: 作成者だけが参加した Room ができ、roomCreated と roomUpdate が届く
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let pusher = RecordingPusher::new();
        let usecase = CreateRoomUseCase::new(repository.clone(), pusher.clone());

        // when (操作):
        let room_id = usecase
            .execute(conn("alice"), PlayerName::new("Alice".to_string()))
            .await
            .unwrap();

        // then (期待する結果):
        let shared = repository.get_room(&room_id).await.unwrap();
        let room = shared.lock().await;
        assert_eq!(room.len(), 1);
        assert_eq!(room.participants()[0].name.as_str(), "Alice");
        assert!(!room.participants()[0].ready);

        let events = pusher.events_for(&conn("alice"));
        assert_eq!(
            events[0],
            RoomEvent::RoomCreated {
                room_id: room_id.clone()
            }
        );
        assert_eq!(events[1].name(), "roomUpdate");
        assert!(
            repository
                .find_room_by_participant(&conn("alice"))
                .await
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_create_room_leaves_previous_room() {
        // テスト項目: 別の Room に参加中なら、そこから退出してから作成する
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let pusher = RecordingPusher::new();
        let usecase = CreateRoomUseCase::new(repository.clone(), pusher.clone());
        let old_room = seed_room(repository.as_ref(), &["alice", "bob"]).await;

        // when (操作):
        let new_room_id = usecase
            .execute(conn("bob"), PlayerName::new("Bob".to_string()))
            .await
            .unwrap();

        // then (期待する結果):
        assert!(!old_room.lock().await.contains(&conn("bob")));
        let found = repository
            .find_room_by_participant(&conn("bob"))
            .await
            .unwrap();
        assert_eq!(found.lock().await.id, new_room_id);
        assert_eq!(repository.count_rooms().await, 2);
    }
}
