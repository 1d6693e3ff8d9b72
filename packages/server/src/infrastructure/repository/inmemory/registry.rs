//! InMemory Room Registry 実装
//!
//! ドメイン層が定義する RoomRegistry trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! ルームの生成・削除はすべて暗黙です：最初の参加で作られ、最後の
//! 参加者が抜けた時点で削除されます。Mutex のクリティカルセクション内で
//! 削除まで行うため、「空のルームが観測される」瞬間はありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, Participant, RegistryError, Room, RoomId, RoomRegistry,
};

/// インメモリ Room Registry 実装
///
/// Room ドメインモデルを保持し、ドメイン層の RoomRegistry trait を
/// 実装します（依存性の逆転）。
pub struct InMemoryRoomRegistry {
    /// ルーム ID と Room ドメインモデルのマップ
    rooms: Mutex<HashMap<RoomId, Room>>,
}

impl InMemoryRoomRegistry {
    /// 新しい InMemoryRoomRegistry を作成
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryRoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn add_participant(
        &self,
        room_id: RoomId,
        participant: Participant,
    ) -> Result<(), RegistryError> {
        let mut rooms = self.rooms.lock().await;
        let joined_at = participant.joined_at;
        let room = rooms
            .entry(room_id.clone())
            .or_insert_with(|| Room::new(room_id, joined_at));
        room.upsert_participant(participant);
        Ok(())
    }

    async fn remove_participant(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
    ) -> Option<Participant> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms.get_mut(room_id)?;
        let removed = room.remove_participant(connection_id);
        // 空になったルームはその場で削除する
        if room.is_empty() {
            rooms.remove(room_id);
        }
        removed
    }

    async fn get_participants(&self, room_id: &RoomId) -> Vec<Participant> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id)
            .map(|room| room.participants.clone())
            .unwrap_or_default()
    }

    async fn find_participant(&self, connection_id: &ConnectionId) -> Option<Participant> {
        let rooms = self.rooms.lock().await;
        rooms
            .values()
            .find_map(|room| room.find_participant(connection_id).cloned())
    }

    async fn rooms_of(&self, connection_id: &ConnectionId) -> Vec<RoomId> {
        let rooms = self.rooms.lock().await;
        rooms
            .values()
            .filter(|room| room.contains(connection_id))
            .map(|room| room.id.clone())
            .collect()
    }

    async fn get_rooms(&self) -> Vec<Room> {
        let rooms = self.rooms.lock().await;
        rooms.values().cloned().collect()
    }

    async fn count_rooms(&self) -> usize {
        let rooms = self.rooms.lock().await;
        rooms.len()
    }
}
