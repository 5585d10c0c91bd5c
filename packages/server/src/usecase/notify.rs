//! Room 宛てのイベント送信ヘルパー
//!
//! 送信失敗はログに残すだけで、呼び出し元の処理は止めない。

use crate::domain::{ConnectionId, MessagePusher, Room, RoomEvent};

/// Room の全参加者にイベントを送信
pub(crate) async fn broadcast_to_room(pusher: &dyn MessagePusher, room: &Room, event: RoomEvent) {
    if let Err(e) = pusher.broadcast(room.member_ids(), &event).await {
        tracing::warn!(
            "Failed to broadcast '{}' to room '{}': {}",
            event.name(),
            room.id,
            e
        );
    }
}

/// Room の参加者とスコアのスナップショットを送信
pub(crate) async fn broadcast_room_update(pusher: &dyn MessagePusher, room: &Room) {
    let event = RoomEvent::RoomUpdate {
        players: room.snapshot(),
    };
    broadcast_to_room(pusher, room, event).await;
}

/// 特定の接続にイベントを送信
pub(crate) async fn push_to(pusher: &dyn MessagePusher, client_id: &ConnectionId, event: RoomEvent) {
    if let Err(e) = pusher.push_to(client_id, &event).await {
        tracing::warn!("Failed to push '{}' to '{}': {}", event.name(), client_id, e);
    }
}
