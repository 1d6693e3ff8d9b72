//! ドメイン層のエラー型定義

use thiserror::Error;

/// Value Object の検証エラー
///
/// クライアントから受け取った文字列をドメインモデルへ変換する際の失敗。
/// UseCase 層で InvalidArgument として呼び出し元にのみ報告されます。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// 必須フィールドが空
    #[error("{0} must not be empty")]
    Empty(&'static str),

    /// 最大長超過
    #[error("{0} exceeds the maximum length of {1}")]
    TooLong(&'static str, usize),
}

/// Registry 操作のエラー
///
/// インメモリ実装では発生しませんが、将来外部ストアへ差し替えた際の
/// 失敗経路としてインターフェースに残しています。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// ストレージが利用できない
    #[error("registry storage unavailable: {0}")]
    Unavailable(String),
}
