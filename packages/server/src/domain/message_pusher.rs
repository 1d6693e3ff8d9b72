//! MessagePusher trait 定義
//!
//! 接続へのメッセージ送信（通知）の抽象化。WebSocket の生成は UI 層が
//! 行い、ここでは送信チャンネルの管理と配送だけを扱います。

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;
use tokio::sync::mpsc;

use super::value_object::ConnectionId;

/// 接続ごとの送信チャンネル
///
/// 送信内容はシリアライズ済みの JSON 文字列。UI 層の pusher ループが
/// このチャンネルを排出して WebSocket へ書き込みます。
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// メッセージ送信のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessagePushError {
    /// 宛先の接続が登録されていない（既に切断済み）
    #[error("connection '{0}' is not registered")]
    ClientNotFound(String),

    /// チャンネルへの書き込みに失敗した
    #[error("failed to push message: {0}")]
    PushFailed(String),
}

/// MessagePusher trait
///
/// UseCase 層はこの trait を通じてのみクライアントへメッセージを
/// 送信します。ポイントツーポイント配送（push_to）は宛先不明をエラーで
/// 返し、ブロードキャストは一部の宛先の失敗を許容します。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信チャンネルを登録する
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続の送信チャンネルを解除する
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 特定の接続へメッセージを送信する
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// 複数の接続へメッセージを送信する
    ///
    /// 既に切断された宛先はスキップして続行します。
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        content: &str,
    ) -> Result<(), MessagePushError>;
}
