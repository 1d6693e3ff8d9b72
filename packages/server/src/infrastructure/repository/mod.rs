//! Repository 実装
//!
//! - `inmemory`: HashMap をストレージとして使用する実装
//! - 将来的に: Redis などの外部ストア（マルチインスタンス構成向け）

pub mod inmemory;

pub use inmemory::{InMemoryChatHistory, InMemoryRoomRegistry};
