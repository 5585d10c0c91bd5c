//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。プロセスを再起動すると全ての Room は失われます。
//!
//! ## ロック構成
//!
//! - テーブル（Room 一覧と接続 → Room の索引）は 1 つの `Mutex` で保護し、検索・追加・削除の間だけ保持する
//! - 各 Room は個別の `Mutex` を持つ（`SharedRoom`）。ある Room の処理が別の Room を待たせることはない

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, Participant, RepositoryError, Room, RoomId, RoomIdFactory, RoomRepository,
    SharedRoom, Timestamp, ValueObjectError,
};

/// 衝突しない Room ID を探す最大試行回数
const MAX_ROOM_ID_ATTEMPTS: usize = 16;

#[derive(Default)]
struct RoomTable {
    rooms: HashMap<RoomId, SharedRoom>,
    members: HashMap<ConnectionId, RoomId>,
}

/// Room ID の生成関数
pub type RoomIdGenerator = Box<dyn Fn() -> Result<RoomId, ValueObjectError> + Send + Sync>;

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    table: Mutex<RoomTable>,
    generate_id: RoomIdGenerator,
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::with_id_generator(Box::new(RoomIdFactory::generate))
    }
}

impl InMemoryRoomRepository {
    /// 空の InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// Room ID の生成方法を指定して作成
    pub fn with_id_generator(generate_id: RoomIdGenerator) -> Self {
        Self {
            table: Mutex::new(RoomTable::default()),
            generate_id,
        }
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create_room(
        &self,
        creator: Participant,
        created_at: Timestamp,
    ) -> Result<SharedRoom, RepositoryError> {
        let mut table = self.table.lock().await;

        let mut room_id = None;
        for _ in 0..MAX_ROOM_ID_ATTEMPTS {
            let Ok(candidate) = (self.generate_id)() else {
                continue;
            };
            if table.rooms.contains_key(&candidate) {
                tracing::debug!("Room id '{}' collided, retrying", candidate);
                continue;
            }
            room_id = Some(candidate);
            break;
        }
        let room_id = room_id.ok_or(RepositoryError::RoomIdExhausted(MAX_ROOM_ID_ATTEMPTS))?;

        let creator_id = creator.id.clone();
        let room = Arc::new(Mutex::new(Room::new(room_id.clone(), creator, created_at)));
        table.rooms.insert(room_id.clone(), Arc::clone(&room));
        table.members.insert(creator_id, room_id);

        Ok(room)
    }

    async fn get_room(&self, room_id: &RoomId) -> Option<SharedRoom> {
        let table = self.table.lock().await;
        table.rooms.get(room_id).cloned()
    }

    async fn find_room_by_participant(&self, connection_id: &ConnectionId) -> Option<SharedRoom> {
        let table = self.table.lock().await;
        let room_id = table.members.get(connection_id)?;
        table.rooms.get(room_id).cloned()
    }

    async fn bind_participant(&self, connection_id: ConnectionId, room_id: RoomId) {
        let mut table = self.table.lock().await;
        table.members.insert(connection_id, room_id);
    }

    async fn unbind_participant(&self, connection_id: &ConnectionId) {
        let mut table = self.table.lock().await;
        table.members.remove(connection_id);
    }

    async fn delete_room(&self, room_id: &RoomId) {
        let mut table = self.table.lock().await;
        if table.rooms.remove(room_id).is_some() {
            table.members.retain(|_, id| id != room_id);
        }
    }

    async fn list_rooms(&self) -> Vec<SharedRoom> {
        let table = self.table.lock().await;
        table.rooms.values().cloned().collect()
    }

    async fn count_rooms(&self) -> usize {
        let table = self.table.lock().await;
        table.rooms.len()
    }
}
