//! ドメイン層のエンティティ定義

use serde::Serialize;

use super::value_object::{ConnectionId, Identity, MessageId, MessageText, Role, RoomId, Timestamp};

/// ルーム参加者
///
/// 1 つのトランスポート接続に対応します。`room_id` を保持するのは、
/// 参加者リストをクライアントへ返す際に「どのルームのメンバーか」を
/// そのまま伝えるためです。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Participant {
    pub connection_id: ConnectionId,
    pub identity: Identity,
    pub room_id: RoomId,
    pub joined_at: Timestamp,
}

impl Participant {
    pub fn new(
        connection_id: ConnectionId,
        identity: Identity,
        room_id: RoomId,
        joined_at: Timestamp,
    ) -> Self {
        Self {
            connection_id,
            identity,
            room_id,
            joined_at,
        }
    }
}

/// ビデオ通話ルーム
///
/// 参加者の集合。メンバーが 0 になったルームは Registry 側で即座に
/// 削除されるため、空のルームが永続することはありません。
#[derive(Debug, Clone, Serialize)]
pub struct Room {
    pub id: RoomId,
    pub participants: Vec<Participant>,
    pub created_at: Timestamp,
}

impl Room {
    pub fn new(id: RoomId, created_at: Timestamp) -> Self {
        Self {
            id,
            participants: Vec::new(),
            created_at,
        }
    }

    /// 参加者を追加する
    ///
    /// 同じ接続 ID が既に参加している場合は identity と参加時刻を
    /// 更新するだけで、重複エントリは作りません（再 join の冪等性）。
    pub fn upsert_participant(&mut self, participant: Participant) {
        match self
            .participants
            .iter_mut()
            .find(|p| p.connection_id == participant.connection_id)
        {
            Some(existing) => *existing = participant,
            None => self.participants.push(participant),
        }
    }

    /// 参加者を削除し、削除された参加者を返す
    ///
    /// 参加していない接続 ID の場合は None（エラーではない）。
    pub fn remove_participant(&mut self, connection_id: &ConnectionId) -> Option<Participant> {
        let index = self
            .participants
            .iter()
            .position(|p| &p.connection_id == connection_id)?;
        Some(self.participants.remove(index))
    }

    pub fn find_participant(&self, connection_id: &ConnectionId) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|p| &p.connection_id == connection_id)
    }

    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.find_participant(connection_id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

/// チャットメッセージ
///
/// 生成後は不変。削除・編集の操作は存在しません。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub room_id: RoomId,
    pub text: MessageText,
    pub sender_identity: Identity,
    pub sender_role: Role,
    pub timestamp: Timestamp,
}

impl ChatMessage {
    pub fn new(
        room_id: RoomId,
        text: MessageText,
        sender_identity: Identity,
        sender_role: Role,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id: MessageId::generate(),
            room_id,
            text,
            sender_identity,
            sender_role,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_room() -> Room {
        let id = RoomId::new("consultation-1".to_string()).unwrap();
        Room::new(id, Timestamp::new(1000))
    }

    fn test_participant(connection_id: &ConnectionId, identity: &str) -> Participant {
        Participant::new(
            connection_id.clone(),
            Identity::new(identity.to_string()).unwrap(),
            RoomId::new("consultation-1".to_string()).unwrap(),
            Timestamp::new(1000),
        )
    }

    #[test]
    fn test_upsert_participant_adds_new_member() {
        // テスト項目: 新規参加者がルームに追加される
        // given (前提条件):
        let mut room = test_room();
        let connection_id = ConnectionId::generate();

        // when (操作):
        room.upsert_participant(test_participant(&connection_id, "a@example.com"));

        // then (期待する結果):
        assert_eq!(room.participants.len(), 1);
        assert!(room.contains(&connection_id));
    }

    #[test]
    fn test_upsert_participant_is_idempotent() {
        // テスト項目: 同じ接続 ID で再 join しても重複エントリは作られず、
        //             identity だけが更新される
        // given (前提条件):
        let mut room = test_room();
        let connection_id = ConnectionId::generate();
        room.upsert_participant(test_participant(&connection_id, "old@example.com"));

        // when (操作):
        room.upsert_participant(test_participant(&connection_id, "new@example.com"));

        // then (期待する結果):
        assert_eq!(room.participants.len(), 1);
        assert_eq!(
            room.find_participant(&connection_id).unwrap().identity.as_str(),
            "new@example.com"
        );
    }

    #[test]
    fn test_remove_participant_returns_removed_member() {
        // テスト項目: 参加者を削除すると、削除された参加者が返される
        // given (前提条件):
        let mut room = test_room();
        let connection_id = ConnectionId::generate();
        room.upsert_participant(test_participant(&connection_id, "a@example.com"));

        // when (操作):
        let removed = room.remove_participant(&connection_id);

        // then (期待する結果):
        assert_eq!(removed.unwrap().identity.as_str(), "a@example.com");
        assert!(room.is_empty());
    }

    #[test]
    fn test_remove_nonexistent_participant_returns_none() {
        // テスト項目: 参加していない接続の削除は None を返す（冪等性）
        // given (前提条件):
        let mut room = test_room();

        // when (操作):
        let removed = room.remove_participant(&ConnectionId::generate());

        // then (期待する結果):
        assert!(removed.is_none());
    }
}
