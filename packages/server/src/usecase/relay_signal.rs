//! UseCase: シグナリングペイロードの中継処理
//!
//! offer / answer / ICE candidate の 3 イベントはすべてこのユースケースで
//! 配送します。リレーはペイロード（SDP や candidate）の中身を一切解釈
//! しません。配送先が既に切断している場合は黙って破棄します：
//! 配送失敗を送信者へ通知するには相手の生存追跡が必要になるため、
//! ベストエフォート配送を仕様として選択しています。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePushError, MessagePusher, Participant, RoomRegistry,
};

/// シグナリング中継のユースケース
pub struct RelaySignalUseCase {
    /// Registry（送信者情報の付与に使用）
    registry: Arc<dyn RoomRegistry>,
    /// MessagePusher（ポイントツーポイント配送）
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelaySignalUseCase {
    /// 新しい RelaySignalUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// シグナリングペイロードを対象の接続へ配送
    ///
    /// # Arguments
    ///
    /// * `target_connection_id` - 宛先接続の ID（クライアントからの生文字列）
    /// * `message` - 配送するメッセージ（JSON、送信者情報付与済み）
    ///
    /// # Returns
    ///
    /// 配送できたかどうか。false は宛先不明（切断済み・空の宛先指定）で、
    /// エラーとしては扱いません。
    pub async fn execute(&self, target_connection_id: String, message: &str) -> bool {
        let Ok(target) = ConnectionId::new(target_connection_id) else {
            tracing::debug!("Signaling payload without target, dropping");
            return false;
        };

        match self.message_pusher.push_to(&target, message).await {
            Ok(()) => true,
            Err(MessagePushError::ClientNotFound(id)) => {
                // 宛先は既に切断済み。送信者への通知は行わない
                tracing::debug!("Signaling target '{}' already gone, dropping payload", id);
                false
            }
            Err(e) => {
                tracing::warn!("Failed to relay signaling payload: {}", e);
                false
            }
        }
    }

    /// 送信者の参加情報を取得
    ///
    /// 中継イベントに送信者の identity を付与するために使います。
    /// どのルームにも参加していない送信者は None。
    pub async fn find_sender(&self, connection_id: &ConnectionId) -> Option<Participant> {
        self.registry.find_participant(connection_id).await
    }
}
