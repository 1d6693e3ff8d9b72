//! UseCase 層のエラー型定義
//!
//! InvalidArgument 系のエラーは呼び出し元の接続にのみエラーイベントとして
//! 返されます。ブロードキャストされることも、接続やプロセスを落とすことも
//! ありません。

use thiserror::Error;

/// ルーム参加のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JoinRoomError {
    /// 必須フィールドの欠落・空値
    #[error("invalid argument: {0} must not be empty")]
    InvalidArgument(&'static str),

    /// Registry の予期しない失敗
    #[error("registry failure: {0}")]
    Registry(String),
}

/// チャット参加のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JoinChatError {
    /// 必須フィールドの欠落・空値
    #[error("invalid argument: {0} must not be empty")]
    InvalidArgument(&'static str),
}

/// チャットメッセージ投稿のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PostMessageError {
    /// 必須フィールドの欠落・空値・長すぎる本文
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}
