//! ドメイン層の Value Object 定義
//!
//! クライアントから渡される生の文字列は、検証済みの Value Object に
//! 変換してからドメイン内を流します。空文字列はすべてここで弾かれるため、
//! UseCase 層以降は「空の roomId」のような状態を考慮する必要がありません。

use serde::Serialize;
use uuid::Uuid;

use super::error::ValidationError;

/// メッセージ本文の最大長（文字数）
pub const MAX_MESSAGE_TEXT_CHARS: usize = 2000;

/// 接続 ID
///
/// トランスポート接続ごとにサーバが採番する一意な ID（UUID v4）。
/// クライアントが自称することはできません。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// 既存の ID 文字列から生成（シグナリングイベントの宛先指定など）
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::Empty("connection_id"));
        }
        Ok(Self(value))
    }

    /// 新しい接続 ID を採番
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// ルーム ID
///
/// クライアントが指定する文字列。非空であること以外の検証は行いません
/// （予約や重複の概念はなく、最初の参加で暗黙に作られます）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::Empty("room_id"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// 参加者の識別子（メールアドレスなど）
///
/// クライアントの自己申告値であり、リレーは検証も永続化もしません。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity(String);

impl Identity {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::Empty("identity"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// チャット参加者のロール（"patient" / "doctor" など）
///
/// 自由形式の文字列。リレーは中身を解釈しません。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Role(String);

impl Role {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::Empty("role"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// チャットメッセージ本文
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageText(String);

impl MessageText {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::Empty("text"));
        }
        if value.chars().count() > MAX_MESSAGE_TEXT_CHARS {
            return Err(ValidationError::TooLong("text", MAX_MESSAGE_TEXT_CHARS));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// チャットメッセージ ID
///
/// 生成時刻 + 接続 ID から合成する方式はクロックずれや再接続時の ID
/// 再利用で衝突し得るため、UUID v4 で採番します。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageId(String);

impl MessageId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Unix タイムスタンプ（JST、ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_accepts_non_empty_string() {
        // テスト項目: 非空の文字列から RoomId が生成できる
        // given (前提条件):
        let value = "consultation-42".to_string();

        // when (操作):
        let result = RoomId::new(value);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "consultation-42");
    }

    #[test]
    fn test_room_id_rejects_empty_string() {
        // テスト項目: 空文字列の RoomId は検証エラーになる
        // given (前提条件):
        let value = "".to_string();

        // when (操作):
        let result = RoomId::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValidationError::Empty("room_id")));
    }

    #[test]
    fn test_room_id_rejects_whitespace_only_string() {
        // テスト項目: 空白のみの RoomId は検証エラーになる
        // given (前提条件):
        let value = "   ".to_string();

        // when (操作):
        let result = RoomId::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValidationError::Empty("room_id")));
    }

    #[test]
    fn test_identity_rejects_empty_string() {
        // テスト項目: 空文字列の Identity は検証エラーになる
        // given (前提条件):
        let value = "".to_string();

        // when (操作):
        let result = Identity::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValidationError::Empty("identity")));
    }

    #[test]
    fn test_message_text_rejects_too_long_text() {
        // テスト項目: 最大長を超える本文は検証エラーになる
        // given (前提条件):
        let value = "あ".repeat(MAX_MESSAGE_TEXT_CHARS + 1);

        // when (操作):
        let result = MessageText::new(value);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValidationError::TooLong("text", MAX_MESSAGE_TEXT_CHARS))
        );
    }

    #[test]
    fn test_message_text_accepts_max_length_text() {
        // テスト項目: ちょうど最大長の本文は受理される
        // given (前提条件):
        let value = "a".repeat(MAX_MESSAGE_TEXT_CHARS);

        // when (操作):
        let result = MessageText::new(value);

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[test]
    fn test_connection_id_generate_is_unique() {
        // テスト項目: 採番された接続 ID が衝突しない
        // given (前提条件):

        // when (操作):
        let first = ConnectionId::generate();
        let second = ConnectionId::generate();

        // then (期待する結果):
        assert_ne!(first, second);
    }

    #[test]
    fn test_connection_id_rejects_empty_string() {
        // テスト項目: 空文字列の接続 ID（宛先指定）は検証エラーになる
        // given (前提条件):
        let value = "".to_string();

        // when (操作):
        let result = ConnectionId::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValidationError::Empty("connection_id")));
    }

    #[test]
    fn test_message_id_generate_is_unique() {
        // テスト項目: 採番されたメッセージ ID が衝突しない
        // given (前提条件):

        // when (操作):
        let first = MessageId::generate();
        let second = MessageId::generate();

        // then (期待する結果):
        assert_ne!(first, second);
    }

    #[test]
    fn test_timestamp_preserves_value() {
        // テスト項目: Timestamp が元のミリ秒値を保持する
        // given (前提条件):
        let millis = 1700000000123;

        // when (操作):
        let timestamp = Timestamp::new(millis);

        // then (期待する結果):
        assert_eq!(timestamp.value(), millis);
    }
}
