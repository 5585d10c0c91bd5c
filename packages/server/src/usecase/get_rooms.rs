//! UseCase: Room 一覧の取得

use std::sync::Arc;

use crate::domain::{RoomRepository, RoomView};

/// Room 一覧取得のユースケース
pub struct GetRoomsUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 稼働中の Room を作成順に返す
    pub async fn execute(&self) -> Vec<RoomView> {
        let mut views = Vec::new();
        for shared in self.repository.list_rooms().await {
            let room = shared.lock().await;
            if !room.is_retired() {
                views.push(room.view());
            }
        }
        views.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });
        views
    }
}
