//! Conversion logic between domain entities and DTOs.
//!
//! 変換はドメイン → DTO の一方向のみです。クライアントから受信した
//! 生の文字列は UseCase 層の検証を通してドメインモデルになるため、
//! DTO → ドメインの変換経路は存在しません。

use crate::domain::entity;
use crate::infrastructure::dto::websocket as dto;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<entity::Participant> for dto::ParticipantInfo {
    fn from(model: entity::Participant) -> Self {
        Self {
            connection_id: model.connection_id.into_string(),
            identity: model.identity.into_string(),
            room_id: model.room_id.into_string(),
        }
    }
}

impl From<entity::ChatMessage> for dto::ChatMessagePayload {
    fn from(model: entity::ChatMessage) -> Self {
        Self {
            id: model.id.into_string(),
            room_id: model.room_id.into_string(),
            text: model.text.into_string(),
            sender_identity: model.sender_identity.into_string(),
            sender_role: model.sender_role.into_string(),
            timestamp: model.timestamp.value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionId, Identity, MessageText, Role, RoomId, Timestamp};

    #[test]
    fn test_domain_participant_to_dto() {
        // テスト項目: ドメインエンティティの Participant が DTO に変換される
        // given (前提条件):
        let connection_id = ConnectionId::generate();
        let participant = entity::Participant::new(
            connection_id.clone(),
            Identity::new("a@example.com".to_string()).unwrap(),
            RoomId::new("consultation-1".to_string()).unwrap(),
            Timestamp::new(1000),
        );

        // when (操作):
        let info: dto::ParticipantInfo = participant.into();

        // then (期待する結果):
        assert_eq!(info.connection_id, connection_id.as_str());
        assert_eq!(info.identity, "a@example.com");
        assert_eq!(info.room_id, "consultation-1");
    }

    #[test]
    fn test_domain_chat_message_to_dto() {
        // テスト項目: ドメインエンティティの ChatMessage が DTO に変換される
        // given (前提条件):
        let message = entity::ChatMessage::new(
            RoomId::new("consultation-1".to_string()).unwrap(),
            MessageText::new("お大事に".to_string()).unwrap(),
            Identity::new("doctor@example.com".to_string()).unwrap(),
            Role::new("doctor".to_string()).unwrap(),
            Timestamp::new(2000),
        );
        let expected_id = message.id.as_str().to_string();

        // when (操作):
        let payload: dto::ChatMessagePayload = message.into();

        // then (期待する結果):
        assert_eq!(payload.id, expected_id);
        assert_eq!(payload.room_id, "consultation-1");
        assert_eq!(payload.text, "お大事に");
        assert_eq!(payload.sender_identity, "doctor@example.com");
        assert_eq!(payload.sender_role, "doctor");
        assert_eq!(payload.timestamp, 2000);
    }
}
