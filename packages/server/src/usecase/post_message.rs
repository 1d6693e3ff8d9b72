//! UseCase: チャットメッセージ投稿処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - PostMessageUseCase::execute() メソッド
//! - 入力検証、履歴への追加（FIFO 上限）、エコー対象の選定
//!
//! ### なぜこのテストが必要か
//! - 送信者を含む購読者全員が同一のサーバ配信ストリームから描画する
//!   設計のため、エコー対象の選定ミスはクライアント表示の分裂になる
//! - 空フィールドの投稿が履歴に混入しないことの保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：購読者への配信とエコー
//! - 異常系：text / sender_identity などの欠落
//! - エッジケース：chat-join せずに投稿した送信者へのエコー

use std::sync::Arc;

use oshin_shared::time::get_jst_timestamp;

use crate::domain::{
    ChatHistoryStore, ChatMessage, ConnectionId, Identity, MessagePusher, MessageText, Role,
    RoomId, Timestamp,
};

use super::error::PostMessageError;

/// チャットメッセージ投稿のユースケース
pub struct PostMessageUseCase {
    /// ChatHistoryStore（履歴と購読者の正本）
    chat_history: Arc<dyn ChatHistoryStore>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl PostMessageUseCase {
    /// 新しい PostMessageUseCase を作成
    pub fn new(
        chat_history: Arc<dyn ChatHistoryStore>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            chat_history,
            message_pusher,
        }
    }

    /// メッセージ投稿を実行
    ///
    /// # Arguments
    ///
    /// * `sender_connection_id` - 投稿した接続の ID
    /// * `room_id` / `text` / `sender_identity` / `sender_role` -
    ///   クライアントからの生文字列
    ///
    /// # Returns
    ///
    /// * `Ok((ChatMessage, Vec<ConnectionId>))` - 追加されたメッセージと
    ///   配信対象（購読者全員。送信者が未購読でもエコーは届く）
    /// * `Err(PostMessageError)` - 入力不備。履歴は変化せず、配信もされない
    pub async fn execute(
        &self,
        sender_connection_id: &ConnectionId,
        room_id: String,
        text: String,
        sender_identity: String,
        sender_role: String,
    ) -> Result<(ChatMessage, Vec<ConnectionId>), PostMessageError> {
        // 1. 入力検証（失敗時は履歴に触れない）
        let room_id =
            RoomId::new(room_id).map_err(|_| PostMessageError::InvalidArgument("room_id"))?;
        let text = MessageText::new(text).map_err(|_| PostMessageError::InvalidArgument("text"))?;
        let sender_identity = Identity::new(sender_identity)
            .map_err(|_| PostMessageError::InvalidArgument("sender_identity"))?;
        let sender_role =
            Role::new(sender_role).map_err(|_| PostMessageError::InvalidArgument("sender_role"))?;

        // 2. メッセージを生成して履歴へ追加（上限超過分は FIFO で破棄される）
        let message = ChatMessage::new(
            room_id.clone(),
            text,
            sender_identity,
            sender_role,
            Timestamp::new(get_jst_timestamp()),
        );
        self.chat_history.add_message(message.clone()).await;

        // 3. 配信対象は購読者全員 + 送信者（エコー）
        //    クライアントはサーバ配信ストリームのみから描画するため、
        //    未購読の送信者にもエコーを届ける
        let mut targets = self.chat_history.get_subscribers(&room_id).await;
        if !targets.contains(sender_connection_id) {
            targets.push(sender_connection_id.clone());
        }

        Ok((message, targets))
    }

    /// メッセージを購読者にブロードキャスト
    ///
    /// # Arguments
    ///
    /// * `target_ids` - 配信対象の接続 ID リスト（送信者を含む）
    /// * `message` - 配信するメッセージ（JSON）
    pub async fn broadcast_message(
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
