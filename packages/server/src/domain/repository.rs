//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{ConnectionId, Participant, RepositoryError, Room, RoomId, Timestamp};

/// Room ごとのロック付きハンドル
///
/// 1 つの Room への変更はこのロックで直列化される。別の Room とはロックを共有しない。
pub type SharedRoom = Arc<Mutex<Room>>;

/// Room Repository trait（Room レジストリ）
///
/// プロセス内で共有される唯一の可変リソース。Room テーブルへのアクセスは必ずこの trait を経由する。
///
/// ## ロック順序
///
/// 呼び出し側は Room のロックを保持したままこの trait のメソッドを呼んでよい。
/// 実装側はテーブルのロックを保持したまま Room のロックを取ってはならない。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// 衝突しない ID で Room を作成し、作成者を登録する
    async fn create_room(
        &self,
        creator: Participant,
        created_at: Timestamp,
    ) -> Result<SharedRoom, RepositoryError>;

    /// Room ID で検索
    async fn get_room(&self, room_id: &RoomId) -> Option<SharedRoom>;

    /// 参加者の接続 ID から所属 Room を検索
    async fn find_room_by_participant(&self, connection_id: &ConnectionId) -> Option<SharedRoom>;

    /// 接続と Room の対応を登録
    async fn bind_participant(&self, connection_id: ConnectionId, room_id: RoomId);

    /// 接続と Room の対応を解除
    async fn unbind_participant(&self, connection_id: &ConnectionId);

    /// Room を削除（存在しなければ何もしない）
    async fn delete_room(&self, room_id: &RoomId);

    /// 全 Room を取得
    async fn list_rooms(&self) -> Vec<SharedRoom>;

    /// Room 数を取得
    async fn count_rooms(&self) -> usize;
}
