//! WebSocket シグナリングイベントの DTO 定義
//!
//! 1 本の WebSocket 上を流れる JSON テキストフレームのスキーマです。
//! `"type"` フィールド（kebab-case）でイベント種別をタグ付けします。
//!
//! ## 欠落フィールドの扱い
//!
//! クライアント → サーバのイベントは全フィールドに `#[serde(default)]`
//! を付けています。フィールド欠落をデシリアライズ失敗にせず空値として
//! 受け取り、UseCase 層の検証で「呼び出し元にのみ返す invalid-argument」
//! として報告するためです（パース失敗にすると欠落と破損 JSON の区別が
//! つかなくなります）。
//!
//! ## 不透明ペイロード
//!
//! `session_description` と `candidate` は `serde_json::Value` のまま
//! 中継します。リレーはメディアネゴシエーションの中身を一切解釈しません。

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// クライアントから受信するイベント
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// ビデオ通話ルームへの参加要求
    JoinRoom {
        #[serde(default)]
        room_id: String,
        #[serde(default)]
        identity: String,
    },
    /// チャットチャンネルへの参加要求
    ChatJoin {
        #[serde(default)]
        room_id: String,
        #[serde(default)]
        identity: String,
        #[serde(default)]
        role: String,
    },
    /// チャットメッセージの投稿
    ChatMessage {
        #[serde(default)]
        room_id: String,
        #[serde(default)]
        text: String,
        #[serde(default)]
        sender_identity: String,
        #[serde(default)]
        sender_role: String,
    },
    /// WebRTC offer の中継要求
    Offer {
        #[serde(default)]
        target_connection_id: String,
        #[serde(default)]
        session_description: Value,
    },
    /// WebRTC answer の中継要求
    Answer {
        #[serde(default)]
        target_connection_id: String,
        #[serde(default)]
        session_description: Value,
    },
    /// ICE candidate の中継要求
    IceCandidate {
        #[serde(default)]
        target_connection_id: String,
        #[serde(default)]
        candidate: Value,
    },
    /// カメラの ON/OFF 切り替え通知
    ToggleVideo {
        #[serde(default)]
        room_id: String,
        #[serde(default)]
        enabled: bool,
    },
    /// マイクの ON/OFF 切り替え通知
    ToggleAudio {
        #[serde(default)]
        room_id: String,
        #[serde(default)]
        enabled: bool,
    },
    /// ルームからの明示的な退出
    LeaveRoom {
        #[serde(default)]
        room_id: String,
    },
}

/// サーバからクライアントへ送信するイベント
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// join-room への応答：参加時点でルームにいた他の参加者リスト
    RoomJoined {
        room_id: String,
        participants: Vec<ParticipantInfo>,
    },
    /// 新しい参加者がルームに加わった（既存参加者への通知）
    ParticipantJoined {
        connection_id: String,
        identity: String,
    },
    /// 参加者がルームを離れた（残った参加者への通知）
    ParticipantLeft {
        connection_id: String,
        identity: String,
    },
    /// 中継された WebRTC offer（送信者情報付き）
    Offer {
        from_connection_id: String,
        from_identity: String,
        session_description: Value,
    },
    /// 中継された WebRTC answer（送信者情報付き）
    Answer {
        from_connection_id: String,
        from_identity: String,
        session_description: Value,
    },
    /// 中継された ICE candidate
    IceCandidate {
        from_connection_id: String,
        candidate: Value,
    },
    /// 他の参加者がカメラを切り替えた
    VideoToggled {
        connection_id: String,
        enabled: bool,
    },
    /// 他の参加者がマイクを切り替えた
    AudioToggled {
        connection_id: String,
        enabled: bool,
    },
    /// chat-join への応答：ルームの過去ログ（古い順）
    ChatHistory {
        room_id: String,
        messages: Vec<ChatMessagePayload>,
    },
    /// 投稿されたチャットメッセージ（送信者本人にもエコーされる）
    ChatMessage { message: ChatMessagePayload },
    /// 呼び出し元にのみ返されるエラー
    Error { code: ErrorCode, message: String },
}

/// エラーイベントの種別
///
/// 呼び出し元へ返すのは入力不備のみです。サーバ内部の異常はログに
/// 記録されるだけで、接続を跨いで伝播することはありません。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCode {
    /// 必須フィールドの欠落・空値、または解釈できないイベント
    InvalidArgument,
}

/// 参加者情報
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantInfo {
    pub connection_id: String,
    pub identity: String,
    pub room_id: String,
}

/// チャットメッセージ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessagePayload {
    pub id: String,
    pub room_id: String,
    pub text: String,
    pub sender_identity: String,
    pub sender_role: String,
    pub timestamp: i64,
}
