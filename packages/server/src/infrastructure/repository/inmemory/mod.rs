//! InMemory Repository 実装

pub mod chat;
pub mod registry;

pub use chat::InMemoryChatHistory;
pub use registry::InMemoryRoomRegistry;
