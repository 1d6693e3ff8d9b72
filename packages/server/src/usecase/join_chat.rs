//! UseCase: チャット参加処理
//!
//! チャットチャンネルの購読はビデオルームのメンバーシップとは独立して
//! います。通話に参加せずチャットだけ購読することも、その逆も可能です。
//! 参加応答として過去ログ（最大 200 件）を返すため、途中参加者も
//! それまでの会話を描画できます。

use std::sync::Arc;

use crate::domain::{ChatHistoryStore, ChatMessage, ConnectionId, Identity, Role, RoomId};

use super::error::JoinChatError;

/// チャット参加の結果
#[derive(Debug)]
pub struct JoinChatOutcome {
    /// 参加したチャンネルのルーム ID
    pub room_id: RoomId,
    /// ルームの過去ログ（古い順、最大 200 件）
    pub history: Vec<ChatMessage>,
}

/// チャット参加のユースケース
pub struct JoinChatUseCase {
    /// ChatHistoryStore（チャンネル購読と履歴の正本）
    chat_history: Arc<dyn ChatHistoryStore>,
}

impl JoinChatUseCase {
    /// 新しい JoinChatUseCase を作成
    pub fn new(chat_history: Arc<dyn ChatHistoryStore>) -> Self {
        Self { chat_history }
    }

    /// チャット参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 参加する接続の ID
    /// * `room_id` - チャンネルのルーム ID（クライアントからの生文字列）
    /// * `identity` - 参加者の識別子（検証のみ。購読は接続 ID 単位）
    /// * `role` - 参加者のロール（検証のみ）
    ///
    /// # Returns
    ///
    /// * `Ok(JoinChatOutcome)` - 購読成功、過去ログ付き
    /// * `Err(JoinChatError)` - 入力不備（呼び出し元にのみ報告される）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        room_id: String,
        identity: String,
        role: String,
    ) -> Result<JoinChatOutcome, JoinChatError> {
        let room_id = RoomId::new(room_id).map_err(|_| JoinChatError::InvalidArgument("room_id"))?;
        Identity::new(identity).map_err(|_| JoinChatError::InvalidArgument("identity"))?;
        Role::new(role).map_err(|_| JoinChatError::InvalidArgument("role"))?;

        self.chat_history
            .subscribe(room_id.clone(), connection_id)
            .await;
        let history = self.chat_history.get_history(&room_id).await;

        Ok(JoinChatOutcome { room_id, history })
    }
}
