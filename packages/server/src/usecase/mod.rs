//! UseCase 層
//!
//! シグナリングイベント 1 種類につき 1 つのユースケースを定義します。
//! 各ユースケースは Repository / MessagePusher の抽象（trait）にのみ
//! 依存し、トランスポートの詳細（WebSocket、JSON スキーマ）は UI 層が
//! 扱います。

pub mod disconnect;
pub mod error;
pub mod get_rooms;
pub mod join_chat;
pub mod join_room;
pub mod leave_room;
pub mod post_message;
pub mod relay_signal;
pub mod toggle_media;

pub use disconnect::DisconnectUseCase;
pub use error::{JoinChatError, JoinRoomError, PostMessageError};
pub use get_rooms::GetRoomsUseCase;
pub use join_chat::{JoinChatOutcome, JoinChatUseCase};
pub use join_room::{JoinRoomOutcome, JoinRoomUseCase};
pub use leave_room::{LeaveRoomUseCase, RoomDeparture};
pub use post_message::PostMessageUseCase;
pub use relay_signal::RelaySignalUseCase;
pub use toggle_media::ToggleMediaUseCase;
