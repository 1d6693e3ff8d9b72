//! Signaling relay server for Oshin telemedicine video consultations.
//!
//! Coordinates video-call rooms, relays WebRTC offer/answer/ICE payloads
//! between peers and keeps ephemeral per-room chat history.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin oshin-server
//! cargo run --bin oshin-server -- --host 0.0.0.0 --port 3000 --allowed-origin https://app.oshin.example
//! ```

use std::sync::Arc;

use clap::Parser;
use oshin_server::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryChatHistory, InMemoryRoomRegistry},
    },
    ui::Server,
    usecase::{
        DisconnectUseCase, GetRoomsUseCase, JoinChatUseCase, JoinRoomUseCase, LeaveRoomUseCase,
        PostMessageUseCase, RelaySignalUseCase, ToggleMediaUseCase,
    },
};
use oshin_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "oshin-server")]
#[command(about = "Signaling relay for telemedicine video consultations", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Origin accepted for cross-origin connections (any origin if omitted)
    #[arg(long)]
    allowed_origin: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repositories
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Repositories (in-memory; lifetime bound to the process)
    let registry = Arc::new(InMemoryRoomRegistry::new());
    let chat_history = Arc::new(InMemoryChatHistory::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let disconnect_usecase = Arc::new(DisconnectUseCase::new(
        registry.clone(),
        chat_history.clone(),
        message_pusher.clone(),
    ));
    let relay_signal_usecase = Arc::new(RelaySignalUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let toggle_media_usecase = Arc::new(ToggleMediaUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let join_chat_usecase = Arc::new(JoinChatUseCase::new(chat_history.clone()));
    let post_message_usecase = Arc::new(PostMessageUseCase::new(
        chat_history.clone(),
        message_pusher.clone(),
    ));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(registry.clone()));

    // 4. Create and run the server
    let server = Server::new(
        join_room_usecase,
        leave_room_usecase,
        disconnect_usecase,
        relay_signal_usecase,
        toggle_media_usecase,
        join_chat_usecase,
        post_message_usecase,
        get_rooms_usecase,
        message_pusher,
    );
    if let Err(e) = server.run(args.host, args.port, args.allowed_origin).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
