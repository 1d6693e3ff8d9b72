//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! Registry / History はプロセス内の可変状態ですが、このインターフェースの
//! 背後に隠すことで、将来マルチインスタンス構成向けに外部ストア実装へ
//! 差し替える際も UseCase 層のイベント処理ロジックを変えずに済みます。

use async_trait::async_trait;

use super::entity::{ChatMessage, Participant, Room};
use super::error::RegistryError;
use super::value_object::{ConnectionId, RoomId};

/// Room Registry trait
///
/// どの接続がどのルームに所属しているかの正本。
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には
/// 依存しません。
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// 参加者をルームに追加する
    ///
    /// ルームが存在しなければ暗黙に作成されます。同じ接続 ID での
    /// 再 join は identity の更新のみ行う冪等な操作です。
    async fn add_participant(
        &self,
        room_id: RoomId,
        participant: Participant,
    ) -> Result<(), RegistryError>;

    /// 参加者をルームから削除し、削除された参加者を返す
    ///
    /// 参加していなかった場合は None（エラーではない）。最後の参加者が
    /// 抜けたルームはその場で削除されます。二重呼び出しは安全です。
    async fn remove_participant(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
    ) -> Option<Participant>;

    /// ルームの参加者リストを取得する（存在しないルームは空）
    async fn get_participants(&self, room_id: &RoomId) -> Vec<Participant>;

    /// 接続 ID から参加情報を検索する
    async fn find_participant(&self, connection_id: &ConnectionId) -> Option<Participant>;

    /// 接続が所属している全てのルーム ID を取得する
    ///
    /// 現在の設計では高々 1 つですが、切断処理はこの走査結果を信頼して
    /// 全ルームを処理します（将来の複数ルーム対応に対する防御）。
    async fn rooms_of(&self, connection_id: &ConnectionId) -> Vec<RoomId>;

    /// 全ルームを取得する
    async fn get_rooms(&self) -> Vec<Room>;

    /// 現在存在するルーム数を取得する
    async fn count_rooms(&self) -> usize;
}

/// Chat History Store trait
///
/// ルームごとの追記専用・上限付きメッセージログと、チャットチャンネルの
/// 購読者リスト。ビデオルームのメンバーシップとは独立しており、通話に
/// 参加せずチャットのみ購読することも、その逆も可能です。履歴はルームが
/// 空になっても削除されません（途中参加者が過去ログを見られるようにする
/// ため。プロセス再起動で消えます）。
#[async_trait]
pub trait ChatHistoryStore: Send + Sync {
    /// 接続をルームのチャットチャンネルに登録する（冪等）
    async fn subscribe(&self, room_id: RoomId, connection_id: ConnectionId);

    /// 接続を全てのチャットチャンネルから解除する（切断時）
    async fn unsubscribe_all(&self, connection_id: &ConnectionId);

    /// ルームのチャット購読者を取得する
    async fn get_subscribers(&self, room_id: &RoomId) -> Vec<ConnectionId>;

    /// メッセージを履歴に追加する
    ///
    /// 上限を超えた場合は最古のエントリから破棄されます（FIFO）。
    async fn add_message(&self, message: ChatMessage);

    /// ルームの履歴を古い順に取得する
    async fn get_history(&self, room_id: &RoomId) -> Vec<ChatMessage>;
}
