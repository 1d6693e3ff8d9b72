//! InMemory Chat History 実装
//!
//! ドメイン層が定義する ChatHistoryStore trait の具体的な実装。
//! ルームごとの履歴は上限付きの VecDeque で保持し、上限超過時は最古の
//! エントリから破棄します（FIFO。エントリが後から「使われる」ことは
//! ないため LRU ではありません）。
//!
//! 履歴は購読者が全員いなくなっても削除されません。ビデオルームの
//! メンバーシップと寿命が異なる点に注意してください。

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatHistoryStore, ChatMessage, ConnectionId, RoomId};

/// 1 ルームあたりの履歴保持件数の上限
pub const DEFAULT_HISTORY_CAPACITY: usize = 200;

/// チャットチャンネルの状態
///
/// 履歴と購読者リストは寿命が異なるため別のマップで持ちます
/// （購読者は切断で消えるが、履歴はプロセス再起動まで残る）。
struct ChatChannels {
    histories: HashMap<RoomId, VecDeque<ChatMessage>>,
    subscribers: HashMap<RoomId, Vec<ConnectionId>>,
}

/// インメモリ Chat History 実装
pub struct InMemoryChatHistory {
    channels: Mutex<ChatChannels>,
    history_capacity: usize,
}

impl InMemoryChatHistory {
    /// 既定の履歴上限（200 件）で作成
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// 履歴上限を指定して作成（テスト用）
    pub fn with_capacity(history_capacity: usize) -> Self {
        Self {
            channels: Mutex::new(ChatChannels {
                histories: HashMap::new(),
                subscribers: HashMap::new(),
            }),
            history_capacity,
        }
    }
}

impl Default for InMemoryChatHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatHistoryStore for InMemoryChatHistory {
    async fn subscribe(&self, room_id: RoomId, connection_id: ConnectionId) {
        let mut channels = self.channels.lock().await;
        let subscribers = channels.subscribers.entry(room_id).or_default();
        if !subscribers.contains(&connection_id) {
            subscribers.push(connection_id);
        }
    }

    async fn unsubscribe_all(&self, connection_id: &ConnectionId) {
        let mut channels = self.channels.lock().await;
        for subscribers in channels.subscribers.values_mut() {
            subscribers.retain(|id| id != connection_id);
        }
        // 購読者のいなくなったチャンネルのエントリは除去する（履歴は残す）
        channels.subscribers.retain(|_, subscribers| !subscribers.is_empty());
    }

    async fn get_subscribers(&self, room_id: &RoomId) -> Vec<ConnectionId> {
        let channels = self.channels.lock().await;
        channels
            .subscribers
            .get(room_id)
            .cloned()
            .unwrap_or_default()
    }

    async fn add_message(&self, message: ChatMessage) {
        let mut channels = self.channels.lock().await;
        let history = channels
            .histories
            .entry(message.room_id.clone())
            .or_default();
        history.push_back(message);
        // 上限超過時は最古のエントリから破棄（FIFO）
        while history.len() > self.history_capacity {
            history.pop_front();
        }
    }

    async fn get_history(&self, room_id: &RoomId) -> Vec<ChatMessage> {
        let channels = self.channels.lock().await;
        channels
            .histories
            .get(room_id)
            .map(|history| history.iter().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Identity, MessageText, Role, Timestamp};

    fn room_id(value: &str) -> RoomId {
        RoomId::new(value.to_string()).unwrap()
    }

    fn test_message(room: &str, text: &str, timestamp: i64) -> ChatMessage {
        ChatMessage::new(
            room_id(room),
            MessageText::new(text.to_string()).unwrap(),
            Identity::new("a@example.com".to_string()).unwrap(),
            Role::new("patient".to_string()).unwrap(),
            Timestamp::new(timestamp),
        )
    }

    #[tokio::test]
    async fn test_add_message_appends_in_order() {
        // テスト項目: メッセージが投稿順に履歴へ追加される
        // given (前提条件):
        let store = InMemoryChatHistory::new();

        // when (操作):
        store.add_message(test_message("consultation-1", "first", 1)).await;
        store.add_message(test_message("consultation-1", "second", 2)).await;
        store.add_message(test_message("consultation-1", "third", 3)).await;

        // then (期待する結果): 古い順に並んでいる
        let history = store.get_history(&room_id("consultation-1")).await;
        let texts: Vec<&str> = history.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_history_capacity_evicts_oldest_first() {
        // テスト項目: 上限を超えた投稿で最古のエントリのみが破棄される
        // given (前提条件):
        let store = InMemoryChatHistory::with_capacity(3);
        store.add_message(test_message("consultation-1", "m1", 1)).await;
        store.add_message(test_message("consultation-1", "m2", 2)).await;
        store.add_message(test_message("consultation-1", "m3", 3)).await;

        // when (操作): 上限 +1 件目を投稿
        store.add_message(test_message("consultation-1", "m4", 4)).await;

        // then (期待する結果): 最古の m1 だけが消え、残りは順序を保つ
        let history = store.get_history(&room_id("consultation-1")).await;
        let texts: Vec<&str> = history.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["m2", "m3", "m4"]);
    }

    #[tokio::test]
    async fn test_history_never_exceeds_capacity() {
        // テスト項目: 大量投稿後も履歴が上限件数を超えない
        // given (前提条件):
        let store = InMemoryChatHistory::with_capacity(5);

        // when (操作):
        for i in 0..50 {
            store
                .add_message(test_message("consultation-1", &format!("m{}", i), i))
                .await;
        }

        // then (期待する結果): 直近 5 件だけが残る
        let history = store.get_history(&room_id("consultation-1")).await;
        assert_eq!(history.len(), 5);
        assert_eq!(history[0].text.as_str(), "m45");
        assert_eq!(history[4].text.as_str(), "m49");
    }

    #[tokio::test]
    async fn test_histories_are_isolated_per_room() {
        // テスト項目: ルームごとに履歴が分離されている
        // given (前提条件):
        let store = InMemoryChatHistory::new();
        store.add_message(test_message("consultation-1", "for room 1", 1)).await;

        // when (操作):
        let other = store.get_history(&room_id("consultation-2")).await;

        // then (期待する結果):
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn test_subscribe_is_idempotent() {
        // テスト項目: 同じ接続の二重購読が重複エントリを作らない
        // given (前提条件):
        let store = InMemoryChatHistory::new();
        let connection_id = ConnectionId::generate();

        // when (操作):
        store.subscribe(room_id("consultation-1"), connection_id.clone()).await;
        store.subscribe(room_id("consultation-1"), connection_id.clone()).await;

        // then (期待する結果):
        let subscribers = store.get_subscribers(&room_id("consultation-1")).await;
        assert_eq!(subscribers.len(), 1);
    }

    #[tokio::test]
    async fn test_unsubscribe_all_removes_from_every_channel() {
        // テスト項目: unsubscribe_all が全チャンネルから接続を外す
        // given (前提条件):
        let store = InMemoryChatHistory::new();
        let leaving = ConnectionId::generate();
        let staying = ConnectionId::generate();
        store.subscribe(room_id("consultation-1"), leaving.clone()).await;
        store.subscribe(room_id("consultation-2"), leaving.clone()).await;
        store.subscribe(room_id("consultation-1"), staying.clone()).await;

        // when (操作):
        store.unsubscribe_all(&leaving).await;

        // then (期待する結果): 他の接続の購読には影響しない
        let room1 = store.get_subscribers(&room_id("consultation-1")).await;
        let room2 = store.get_subscribers(&room_id("consultation-2")).await;
        assert_eq!(room1, vec![staying]);
        assert!(room2.is_empty());
    }

    #[tokio::test]
    async fn test_history_survives_unsubscribe() {
        // テスト項目: 購読者が全員いなくなっても履歴は残る
        // given (前提条件):
        let store = InMemoryChatHistory::new();
        let connection_id = ConnectionId::generate();
        store.subscribe(room_id("consultation-1"), connection_id.clone()).await;
        store.add_message(test_message("consultation-1", "still here", 1)).await;

        // when (操作):
        store.unsubscribe_all(&connection_id).await;

        // then (期待する結果): 後から参加したクライアントが過去ログを見られる
        let history = store.get_history(&room_id("consultation-1")).await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].text.as_str(), "still here");
    }
}
