//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - ルーム参加処理（入力検証、既存参加者リストの構築、ルーム移動）
//!
//! ### なぜこのテストが必要か
//! - 参加直後に Registry へ反映されていることの保証（シグナリングの前提）
//! - 再 join の冪等性と、別ルームへの join がメンバーシップの切り替えに
//!   なることの確認
//! - 空フィールドが呼び出し元へのエラーにのみなることの確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：空のルーム / 参加者のいるルームへの参加
//! - 異常系：room_id / identity の欠落
//! - エッジケース：同一ルームへの再 join、参加中の別ルームへの join

use std::sync::Arc;

use oshin_shared::time::get_jst_timestamp;

use crate::domain::{
    ConnectionId, Identity, MessagePusher, Participant, RoomId, RoomRegistry, Timestamp,
};

use super::error::JoinRoomError;
use super::leave_room::RoomDeparture;

/// ルーム参加の結果
#[derive(Debug)]
pub struct JoinRoomOutcome {
    /// 参加したルームの ID
    pub room_id: RoomId,
    /// 登録された参加者本人
    pub participant: Participant,
    /// 参加時点で既にルームにいた他の参加者
    ///
    /// 参加クライアントはこのリストの各相手に対して offer を送り、
    /// シグナリングを開始します。
    pub existing_participants: Vec<Participant>,
    /// participant-joined を通知する対象（既存参加者）
    pub notify_targets: Vec<ConnectionId>,
    /// 別ルームから移動してきた場合、元ルームの退出情報
    pub departed: Option<RoomDeparture>,
}

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Registry（ルームメンバーシップの正本）
    registry: Arc<dyn RoomRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 参加する接続の ID（サーバ採番）
    /// * `room_id` - 参加先ルームの ID（クライアントからの生文字列）
    /// * `identity` - 参加者の識別子（クライアントからの生文字列）
    ///
    /// # Returns
    ///
    /// * `Ok(JoinRoomOutcome)` - 参加成功
    /// * `Err(JoinRoomError)` - 入力不備（呼び出し元にのみ報告される）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        room_id: String,
        identity: String,
    ) -> Result<JoinRoomOutcome, JoinRoomError> {
        // 1. 入力検証
        let room_id = RoomId::new(room_id).map_err(|_| JoinRoomError::InvalidArgument("room_id"))?;
        let identity =
            Identity::new(identity).map_err(|_| JoinRoomError::InvalidArgument("identity"))?;

        // 2. 別ルームに参加中であれば先に退出させる（ルーム移動）
        let departed = match self.registry.find_participant(&connection_id).await {
            Some(previous) if previous.room_id != room_id => {
                self.leave_previous_room(&connection_id, previous.room_id)
                    .await
            }
            _ => None,
        };

        // 3. 参加時点の既存参加者を取得（再 join の場合は自分を除外）
        let existing_participants: Vec<Participant> = self
            .registry
            .get_participants(&room_id)
            .await
            .into_iter()
            .filter(|p| p.connection_id != connection_id)
            .collect();

        // 4. Registry に参加者を登録
        let joined_at = Timestamp::new(get_jst_timestamp());
        let participant = Participant::new(
            connection_id.clone(),
            identity,
            room_id.clone(),
            joined_at,
        );
        self.registry
            .add_participant(room_id.clone(), participant.clone())
            .await
            .map_err(|e| JoinRoomError::Registry(e.to_string()))?;

        let notify_targets = existing_participants
            .iter()
            .map(|p| p.connection_id.clone())
            .collect();

        Ok(JoinRoomOutcome {
            room_id,
            participant,
            existing_participants,
            notify_targets,
            departed,
        })
    }

    /// 移動前のルームから退出し、退出情報を返す
    async fn leave_previous_room(
        &self,
        connection_id: &ConnectionId,
        room_id: RoomId,
    ) -> Option<RoomDeparture> {
        let participant = self
            .registry
            .remove_participant(&room_id, connection_id)
            .await?;
        let notify_targets = self
            .registry
            .get_participants(&room_id)
            .await
            .into_iter()
            .map(|p| p.connection_id)
            .collect();
        Some(RoomDeparture {
            room_id,
            participant,
            notify_targets,
        })
    }

    /// 参加者が join したことを既存の参加者にブロードキャスト
    ///
    /// # Arguments
    ///
    /// * `target_ids` - ブロードキャスト対象の接続 ID リスト
    /// * `message` - ブロードキャストするメッセージ（JSON）
    pub async fn broadcast_participant_joined(
        &self,
        target_ids: Vec<ConnectionId>,
        message: &str,
    ) -> Result<(), String> {
        self.message_pusher
            .broadcast(target_ids, message)
            .await
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRegistry,
    };

    fn create_test_usecase() -> (Arc<InMemoryRoomRegistry>, JoinRoomUseCase) {
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let usecase = JoinRoomUseCase::new(
            registry.clone(),
            Arc::new(WebSocketMessagePusher::new()),
        );
        (registry, usecase)
    }

    #[tokio::test]
    async fn test_join_empty_room() {
        // テスト項目: 誰もいないルームへの参加は既存参加者ゼロで成功する
        // given (前提条件):
        let (registry, usecase) = create_test_usecase();
        let connection_id = ConnectionId::generate();

        // when (操作):
        let outcome = usecase
            .execute(
                connection_id.clone(),
                "consultation-1".to_string(),
                "a@example.com".to_string(),
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert!(outcome.existing_participants.is_empty());
        assert!(outcome.notify_targets.is_empty());
        assert!(outcome.departed.is_none());

        // 実行直後に Registry へ反映されている
        let participants = registry.get_participants(&outcome.room_id).await;
        assert_eq!(participants.len(), 1);
        assert_eq!(participants[0].connection_id, connection_id);
    }

    #[tokio::test]
    async fn test_join_returns_existing_participants_and_notify_targets() {
        // テスト項目: 参加者のいるルームへの参加で既存参加者リストと
        //             通知対象が返される
        // given (前提条件):
        let (_registry, usecase) = create_test_usecase();
        let first = ConnectionId::generate();
        usecase
            .execute(
                first.clone(),
                "consultation-1".to_string(),
                "a@example.com".to_string(),
            )
            .await
            .unwrap();

        // when (操作):
        let second = ConnectionId::generate();
        let outcome = usecase
            .execute(
                second,
                "consultation-1".to_string(),
                "b@example.com".to_string(),
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(outcome.existing_participants.len(), 1);
        assert_eq!(
            outcome.existing_participants[0].identity.as_str(),
            "a@example.com"
        );
        assert_eq!(outcome.notify_targets, vec![first]);
    }

    #[tokio::test]
    async fn test_join_with_empty_room_id_fails() {
        // テスト項目: room_id が空の参加はエラーになる
        // given (前提条件):
        let (registry, usecase) = create_test_usecase();

        // when (操作):
        let result = usecase
            .execute(
                ConnectionId::generate(),
                "".to_string(),
                "a@example.com".to_string(),
            )
            .await;

        // then (期待する結果): 呼び出し元へのエラーのみで、状態は変化しない
        assert_eq!(
            result.unwrap_err(),
            JoinRoomError::InvalidArgument("room_id")
        );
        assert_eq!(registry.count_rooms().await, 0);
    }

    #[tokio::test]
    async fn test_join_with_empty_identity_fails() {
        // テスト項目: identity が空の参加はエラーになる
        // given (前提条件):
        let (registry, usecase) = create_test_usecase();

        // when (操作):
        let result = usecase
            .execute(
                ConnectionId::generate(),
                "consultation-1".to_string(),
                "".to_string(),
            )
            .await;

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            JoinRoomError::InvalidArgument("identity")
        );
        assert_eq!(registry.count_rooms().await, 0);
    }

    #[tokio::test]
    async fn test_rejoin_same_room_is_idempotent() {
        // テスト項目: 同一ルームへの再 join は identity の更新のみで、
        //             既存参加者リストに自分が現れない
        // given (前提条件):
        let (registry, usecase) = create_test_usecase();
        let connection_id = ConnectionId::generate();
        usecase
            .execute(
                connection_id.clone(),
                "consultation-1".to_string(),
                "old@example.com".to_string(),
            )
            .await
            .unwrap();

        // when (操作):
        let outcome = usecase
            .execute(
                connection_id.clone(),
                "consultation-1".to_string(),
                "new@example.com".to_string(),
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert!(outcome.existing_participants.is_empty());
        assert!(outcome.departed.is_none());

        let participants = registry.get_participants(&outcome.room_id).await;
        assert_eq!(participants.len(), 1);
        assert_eq!(participants[0].identity.as_str(), "new@example.com");
    }

    #[tokio::test]
    async fn test_join_different_room_switches_membership() {
        // テスト項目: 参加中に別ルームへ join するとメンバーシップが
        //             切り替わり、元ルームの退出情報が返される
        // given (前提条件):
        let (registry, usecase) = create_test_usecase();
        let moving = ConnectionId::generate();
        let staying = ConnectionId::generate();
        usecase
            .execute(
                moving.clone(),
                "consultation-1".to_string(),
                "a@example.com".to_string(),
            )
            .await
            .unwrap();
        usecase
            .execute(
                staying.clone(),
                "consultation-1".to_string(),
                "b@example.com".to_string(),
            )
            .await
            .unwrap();

        // when (操作):
        let outcome = usecase
            .execute(
                moving.clone(),
                "consultation-2".to_string(),
                "a@example.com".to_string(),
            )
            .await
            .unwrap();

        // then (期待する結果): 元ルームの残りメンバーが通知対象になる
        let departed = outcome.departed.unwrap();
        assert_eq!(departed.room_id.as_str(), "consultation-1");
        assert_eq!(departed.notify_targets, vec![staying.clone()]);

        // 元ルームには staying だけが残り、新ルームに moving がいる
        let old_room = RoomId::new("consultation-1".to_string()).unwrap();
        let new_room = RoomId::new("consultation-2".to_string()).unwrap();
        let old_members = registry.get_participants(&old_room).await;
        let new_members = registry.get_participants(&new_room).await;
        assert_eq!(old_members.len(), 1);
        assert_eq!(old_members[0].connection_id, staying);
        assert_eq!(new_members.len(), 1);
        assert_eq!(new_members[0].connection_id, moving);
    }
}
