//! UseCase: ルーム退出処理
//!
//! 明示的な leave-room イベントとトランスポート切断の両方から呼ばれ得る
//! ため、全体が冪等です。参加していないルームからの退出は単なる no-op
//! で、エラーにはなりません。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, Participant, RoomId, RoomRegistry};

/// ルーム退出の結果
///
/// 退出した参加者と、participant-left を通知すべき残りの参加者。
/// ルーム移動・明示的退出・切断の 3 経路で共通に使われます。
#[derive(Debug)]
pub struct RoomDeparture {
    /// 退出したルームの ID
    pub room_id: RoomId,
    /// 退出した参加者
    pub participant: Participant,
    /// participant-left を通知する対象（退出後に残っている参加者）
    pub notify_targets: Vec<ConnectionId>,
}

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    /// Registry（ルームメンバーシップの正本）
    registry: Arc<dyn RoomRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// ルーム退出を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 退出する接続の ID
    /// * `room_id` - 退出するルームの ID（クライアントからの生文字列）
    ///
    /// # Returns
    ///
    /// * `Some(RoomDeparture)` - 退出が行われ、通知対象が存在し得る
    /// * `None` - 参加していなかった（no-op。空の room_id もここに含む）
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: String,
    ) -> Option<RoomDeparture> {
        // 空の room_id は「どのルームにもいない」扱いで no-op
        let room_id = RoomId::new(room_id).ok()?;

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

    /// 参加者が退出したことを残りの参加者にブロードキャスト
    ///
    /// # Arguments
    ///
    /// * `target_ids` - ブロードキャスト対象の接続 ID リスト
    /// * `message` - ブロードキャストするメッセージ（JSON）
    pub async fn broadcast_participant_left(
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
