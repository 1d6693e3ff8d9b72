//! Server state shared across handlers.

use std::sync::Arc;

use crate::domain::MessagePusher;
use crate::usecase::{
    DisconnectUseCase, GetRoomsUseCase, JoinChatUseCase, JoinRoomUseCase, LeaveRoomUseCase,
    PostMessageUseCase, RelaySignalUseCase, ToggleMediaUseCase,
};

/// Shared application state
pub struct AppState {
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// LeaveRoomUseCase（ルーム退出のユースケース）
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// DisconnectUseCase（トランスポート切断のユースケース）
    pub disconnect_usecase: Arc<DisconnectUseCase>,
    /// RelaySignalUseCase（シグナリング中継のユースケース）
    pub relay_signal_usecase: Arc<RelaySignalUseCase>,
    /// ToggleMediaUseCase（メディア切り替え通知のユースケース）
    pub toggle_media_usecase: Arc<ToggleMediaUseCase>,
    /// JoinChatUseCase（チャット参加のユースケース）
    pub join_chat_usecase: Arc<JoinChatUseCase>,
    /// PostMessageUseCase（チャット投稿のユースケース）
    pub post_message_usecase: Arc<PostMessageUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// MessagePusher（接続時のチャンネル登録と呼び出し元への応答に使用）
    pub message_pusher: Arc<dyn MessagePusher>,
}
