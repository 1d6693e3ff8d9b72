//! ドメイン層
//!
//! シグナリングリレーの中核となるモデルとインターフェースを定義します。
//! Infrastructure 層・UseCase 層はこのモジュールの型にのみ依存します。

pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{ChatMessage, Participant, Room};
pub use error::{RegistryError, ValidationError};
pub use message_pusher::{MessagePushError, MessagePusher, PusherChannel};
pub use repository::{ChatHistoryStore, RoomRegistry};
pub use value_object::{ConnectionId, Identity, MessageId, MessageText, Role, RoomId, Timestamp};
