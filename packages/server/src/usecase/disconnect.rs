//! UseCase: トランスポート切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectUseCase::execute() メソッド
//! - 切断した接続の全ルームからの退出、チャット購読の解除、
//!   送信チャンネルの登録解除
//!
//! ### なぜこのテストが必要か
//! - 切断処理はこのリレーで最も重要な回復経路。取りこぼすと退出通知の
//!   来ない「ゴースト参加者」がルームに残り続ける
//! - 明示的な leave-room の後に切断が来る二重実行が安全であることの保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：ルーム参加中の切断と残存参加者への通知
//! - エッジケース：どのルームにも参加していない接続の切断、
//!   leave 済み接続の切断

use std::sync::Arc;

use crate::domain::{ChatHistoryStore, ConnectionId, MessagePusher, RoomRegistry};

use super::leave_room::RoomDeparture;

/// トランスポート切断のユースケース
pub struct DisconnectUseCase {
    /// Registry（ルームメンバーシップの正本）
    registry: Arc<dyn RoomRegistry>,
    /// ChatHistoryStore（チャット購読の解除用）
    chat_history: Arc<dyn ChatHistoryStore>,
    /// MessagePusher（送信チャンネルの登録解除用）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectUseCase {
    /// 新しい DisconnectUseCase を作成
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        chat_history: Arc<dyn ChatHistoryStore>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            chat_history,
            message_pusher,
        }
    }

    /// 切断処理を実行
    ///
    /// 接続が所属していた全てのルームを Registry から走査して退出させます。
    /// 現在の設計では所属は高々 1 ルームですが、その不変条件を盲信せず
    /// 走査結果の全件を処理します（複数ルーム対応への拡張に対する防御）。
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 切断した接続の ID
    ///
    /// # Returns
    ///
    /// ルームごとの退出情報。呼び出し元はこれを使って participant-left を
    /// ブロードキャストします。
    pub async fn execute(&self, connection_id: &ConnectionId) -> Vec<RoomDeparture> {
        let rooms = self.registry.rooms_of(connection_id).await;

        let mut departures = Vec::new();
        for room_id in rooms {
            if let Some(participant) = self
                .registry
                .remove_participant(&room_id, connection_id)
                .await
            {
                let notify_targets = self
                    .registry
                    .get_participants(&room_id)
                    .await
                    .into_iter()
                    .map(|p| p.connection_id)
                    .collect();
                departures.push(RoomDeparture {
                    room_id,
                    participant,
                    notify_targets,
                });
            }
        }

        self.chat_history.unsubscribe_all(connection_id).await;
        self.message_pusher.unregister_client(connection_id).await;

        departures
    }

    /// 参加者が left したことを残りの参加者にブロードキャスト
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
