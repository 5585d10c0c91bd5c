//! UseCase テスト用のヘルパー

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{
    ConnectionId, MessagePushError, MessagePusher, Participant, PlayerName, PusherChannel,
    RoomEvent, RoomRepository, SharedRoom, Timestamp,
};

/// 送信されたイベントを記録するだけの MessagePusher
#[derive(Default)]
pub struct RecordingPusher {
    sent: Mutex<Vec<(Vec<ConnectionId>, RoomEvent)>>,
}

impl RecordingPusher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// 送信された全イベント（送信順）
    pub fn events(&self) -> Vec<RoomEvent> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, event)| event.clone())
            .collect()
    }

    /// 指定の接続が受け取ったイベント（送信順）
    pub fn events_for(&self, client_id: &ConnectionId) -> Vec<RoomEvent> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(targets, _)| targets.contains(client_id))
            .map(|(_, event)| event.clone())
            .collect()
    }

    /// 指定名のイベントの送信回数
    pub fn count(&self, name: &str) -> usize {
        self.events().iter().filter(|e| e.name() == name).count()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

#[async_trait]
impl MessagePusher for RecordingPusher {
    async fn register_client(&self, _client_id: ConnectionId, _sender: PusherChannel) {}

    async fn unregister_client(&self, _client_id: &ConnectionId) {}

    async fn push_to(
        &self,
        client_id: &ConnectionId,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError> {
        self.sent
            .lock()
            .unwrap()
            .push((vec![client_id.clone()], event.clone()));
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError> {
        self.sent.lock().unwrap().push((targets, event.clone()));
        Ok(())
    }
}

pub fn conn(id: &str) -> ConnectionId {
    ConnectionId::new(id.to_string()).unwrap()
}

pub fn participant(id: &str) -> Participant {
    Participant::new(
        conn(id),
        PlayerName::new(id.to_string()),
        Timestamp::new(1000),
    )
}

/// 指定の参加者（先頭が作成者）で Room を作る
pub async fn seed_room(repository: &dyn RoomRepository, ids: &[&str]) -> SharedRoom {
    let room = repository
        .create_room(participant(ids[0]), Timestamp::new(1000))
        .await
        .unwrap();
    {
        let mut guard = room.lock().await;
        for id in &ids[1..] {
            guard.add_participant(participant(id)).unwrap();
            repository
                .bind_participant(conn(id), guard.id.clone())
                .await;
        }
    }
    room
}
