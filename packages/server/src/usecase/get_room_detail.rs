//! UseCase: Room 詳細の取得

use std::sync::Arc;

use crate::domain::{RoomId, RoomRepository, RoomView};

use super::error::GetRoomDetailError;

/// Room 詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 指定 ID の Room を返す
    ///
    /// ID の形式が不正な場合も存在しない Room として扱う。
    pub async fn execute(&self, room_id: String) -> Result<RoomView, GetRoomDetailError> {
        let room_id = RoomId::new(room_id).map_err(|_| GetRoomDetailError::RoomNotFound)?;
        let shared = self
            .repository
            .get_room(&room_id)
            .await
            .ok_or(GetRoomDetailError::RoomNotFound)?;
        let room = shared.lock().await;
        if room.is_retired() {
            return Err(GetRoomDetailError::RoomNotFound);
        }
        Ok(room.view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::RoomPhase,
        infrastructure::repository::InMemoryRoomRepository,
        usecase::test_support::{conn, seed_room},
    };

    #[tokio::test]
    async fn test_get_room_detail() {
        // テスト項目: 既存の Room の詳細を取得できる
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let room = seed_room(repository.as_ref(), &["alice", "bob"]).await;
        let room_id = room.lock().await.id.clone();
        let usecase = GetRoomDetailUseCase::new(repository);

        // when (操作):
        let view = usecase
            .execute(room_id.as_str().to_string())
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(view.id, room_id);
        assert_eq!(view.phase, RoomPhase::Waiting);
        assert_eq!(view.participants[1].id, conn("bob"));
        assert_eq!(view.current_question, None);
    }

    #[tokio::test]
    async fn test_get_room_detail_not_found() {
        // テスト項目: 存在しない ID・不正な形式の ID は RoomNotFound
        // given (前提条件):
        let usecase = GetRoomDetailUseCase::new(Arc::new(InMemoryRoomRepository::new()));

        // when (操作) / then (期待する結果):
        assert_eq!(
            usecase.execute("abc123".to_string()).await,
            Err(GetRoomDetailError::RoomNotFound)
        );
        assert_eq!(
            usecase.execute("Not A Room!".to_string()).await,
            Err(GetRoomDetailError::RoomNotFound)
        );
    }
}
