//! Server execution logic.

use std::sync::Arc;

use axum::{Router, http::HeaderValue, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::domain::MessagePusher;
use crate::usecase::{
    DisconnectUseCase, GetRoomsUseCase, JoinChatUseCase, JoinRoomUseCase, LeaveRoomUseCase,
    PostMessageUseCase, RelaySignalUseCase, ToggleMediaUseCase,
};

use super::{
    handler::{debug_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket signaling server
///
/// This struct encapsulates the server configuration and provides methods
/// to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(/* use cases and pusher */);
/// server.run("127.0.0.1".to_string(), 8080, None).await?;
/// ```
pub struct Server {
    /// JoinRoomUseCase（ルーム参加のユースケース）
    join_room_usecase: Arc<JoinRoomUseCase>,
    /// LeaveRoomUseCase（ルーム退出のユースケース）
    leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// DisconnectUseCase（トランスポート切断のユースケース）
    disconnect_usecase: Arc<DisconnectUseCase>,
    /// RelaySignalUseCase（シグナリング中継のユースケース）
    relay_signal_usecase: Arc<RelaySignalUseCase>,
    /// ToggleMediaUseCase（メディア切り替え通知のユースケース）
    toggle_media_usecase: Arc<ToggleMediaUseCase>,
    /// JoinChatUseCase（チャット参加のユースケース）
    join_chat_usecase: Arc<JoinChatUseCase>,
    /// PostMessageUseCase（チャット投稿のユースケース）
    post_message_usecase: Arc<PostMessageUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// MessagePusher（接続チャンネルの登録と応答送信）
    message_pusher: Arc<dyn MessagePusher>,
}

impl Server {
    /// Create a new Server instance
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        join_room_usecase: Arc<JoinRoomUseCase>,
        leave_room_usecase: Arc<LeaveRoomUseCase>,
        disconnect_usecase: Arc<DisconnectUseCase>,
        relay_signal_usecase: Arc<RelaySignalUseCase>,
        toggle_media_usecase: Arc<ToggleMediaUseCase>,
        join_chat_usecase: Arc<JoinChatUseCase>,
        post_message_usecase: Arc<PostMessageUseCase>,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            join_room_usecase,
            leave_room_usecase,
            disconnect_usecase,
            relay_signal_usecase,
            toggle_media_usecase,
            join_chat_usecase,
            post_message_usecase,
            get_rooms_usecase,
            message_pusher,
        }
    }

    /// Build the axum router
    ///
    /// # Arguments
    ///
    /// * `allowed_origin` - Origin accepted for cross-origin connections.
    ///   `None` accepts any origin (development setups).
    ///
    /// # Errors
    ///
    /// Returns an error if `allowed_origin` is not a valid header value.
    pub fn router(
        self,
        allowed_origin: Option<&str>,
    ) -> Result<Router, Box<dyn std::error::Error>> {
        let app_state = Arc::new(AppState {
            join_room_usecase: self.join_room_usecase,
            leave_room_usecase: self.leave_room_usecase,
            disconnect_usecase: self.disconnect_usecase,
            relay_signal_usecase: self.relay_signal_usecase,
            toggle_media_usecase: self.toggle_media_usecase,
            join_chat_usecase: self.join_chat_usecase,
            post_message_usecase: self.post_message_usecase,
            get_rooms_usecase: self.get_rooms_usecase,
            message_pusher: self.message_pusher,
        });

        let cors = match allowed_origin {
            Some(origin) => CorsLayer::new()
                .allow_origin(origin.parse::<HeaderValue>()?)
                .allow_methods(Any)
                .allow_headers(Any),
            None => CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        };

        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/debug/rooms", get(debug_rooms))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(app_state);

        Ok(app)
    }

    /// Run the WebSocket signaling server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    /// * `allowed_origin` - Origin accepted for cross-origin connections
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address
    /// or if there's an error during server execution.
    pub async fn run(
        self,
        host: String,
        port: u16,
        allowed_origin: Option<String>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router(allowed_origin.as_deref())?;

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "Signaling relay listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        match &allowed_origin {
            Some(origin) => tracing::info!("Accepting cross-origin connections from {}", origin),
            None => tracing::info!("Accepting cross-origin connections from any origin"),
        }
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
