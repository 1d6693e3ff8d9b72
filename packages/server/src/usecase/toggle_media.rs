//! UseCase: メディア切り替えの通知処理
//!
//! カメラ / マイクの ON/OFF はルーム内の他の参加者への状態通知であって、
//! メディアそのものには触れません。送信者がルームに参加していない場合は
//! no-op です（エラーではありません）。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomId, RoomRegistry};

/// メディア切り替え通知のユースケース
pub struct ToggleMediaUseCase {
    /// Registry（ルームメンバーシップの正本）
    registry: Arc<dyn RoomRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ToggleMediaUseCase {
    /// 新しい ToggleMediaUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 通知対象（送信者以外のルーム参加者）を取得
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 切り替えを行った接続の ID
    /// * `room_id` - 対象ルームの ID（クライアントからの生文字列）
    ///
    /// # Returns
    ///
    /// ブロードキャスト対象の接続 ID リスト。送信者がルームに参加して
    /// いない場合（空の room_id を含む）は空。
    pub async fn execute(&self, connection_id: &ConnectionId, room_id: String) -> Vec<ConnectionId> {
        let Ok(room_id) = RoomId::new(room_id) else {
            return Vec::new();
        };

        let participants = self.registry.get_participants(&room_id).await;
        if !participants
            .iter()
            .any(|p| &p.connection_id == connection_id)
        {
            // ルームにいない接続からの切り替え通知は no-op
            return Vec::new();
        }

        participants
            .into_iter()
            .map(|p| p.connection_id)
            .filter(|id| id != connection_id)
            .collect()
    }

    /// メディア状態の変更を他の参加者にブロードキャスト
    ///
    /// # Arguments
    ///
    /// * `target_ids` - ブロードキャスト対象の接続 ID リスト
    /// * `message` - ブロードキャストするメッセージ（JSON）
    pub async fn broadcast_media_state(
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
