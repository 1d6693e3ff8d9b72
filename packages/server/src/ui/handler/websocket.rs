//! WebSocket connection handlers.
//!
//! One WebSocket per client. The receive loop parses named events and hands
//! them to the matching use case; outbound traffic goes through the
//! per-connection pusher channel so that replies, relays and broadcasts all
//! share a single ordered stream.
//!
//! A malformed or invalid event never tears down the connection: the caller
//! gets an `error` event (or nothing, for best-effort relays) and the loop
//! keeps running. The disconnect tail at the bottom of `handle_socket` is
//! the recovery path that keeps ghost participants out of the registry.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde_json::Value;
use tokio::sync::mpsc;

use crate::{
    domain::ConnectionId,
    infrastructure::dto::websocket::{
        ChatMessagePayload, ClientEvent, ErrorCode, ParticipantInfo, ServerEvent,
    },
    ui::state::AppState,
    usecase::{JoinChatError, JoinRoomError, PostMessageError, RoomDeparture},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them
/// to the WebSocket sender.
///
/// This is the only writer of the socket: use cases enqueue into the
/// connection's channel via the MessagePusher and this loop drains it.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    // Assign the server-side connection id; clients never pick their own
    let connection_id = ConnectionId::generate();
    tracing::info!("Connection '{}' opened", connection_id.as_str());

    let (sender, mut receiver) = socket.split();

    // Register the outbound channel before any event can produce a reply
    let (tx, rx) = mpsc::unbounded_channel();
    state
        .message_pusher
        .register_client(connection_id.clone(), tx)
        .await;

    let mut send_task = pusher_loop(rx, sender);

    let recv_state = state.clone();
    let recv_connection_id = connection_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!(
                        "WebSocket error on connection '{}': {}",
                        recv_connection_id.as_str(),
                        e
                    );
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => {
                            dispatch_event(&recv_state, &recv_connection_id, event).await;
                        }
                        Err(e) => {
                            tracing::warn!(
                                "Unrecognized event from connection '{}': {}",
                                recv_connection_id.as_str(),
                                e
                            );
                            send_error(&recv_state, &recv_connection_id, "unrecognized event")
                                .await;
                        }
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!(
                        "Connection '{}' requested close",
                        recv_connection_id.as_str()
                    );
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Disconnect cleanup: leave every room the connection belonged to and
    // notify the peers that remain. Skipping this is how ghost participants
    // are born, so it runs on every exit path of the socket.
    let departures = state.disconnect_usecase.execute(&connection_id).await;
    for departure in departures {
        let left_json = encode(&participant_left_event(&departure));
        if let Err(e) = state
            .disconnect_usecase
            .broadcast_participant_left(departure.notify_targets.clone(), &left_json)
            .await
        {
            tracing::warn!("Failed to broadcast participant-left: {}", e);
        } else {
            tracing::info!(
                "Broadcasted participant-left for '{}' in room '{}'",
                connection_id.as_str(),
                departure.room_id.as_str()
            );
        }
    }
    tracing::info!("Connection '{}' closed", connection_id.as_str());
}

/// Route a parsed client event to its use case.
async fn dispatch_event(state: &Arc<AppState>, connection_id: &ConnectionId, event: ClientEvent) {
    match event {
        ClientEvent::JoinRoom { room_id, identity } => {
            handle_join_room(state, connection_id, room_id, identity).await;
        }
        ClientEvent::ChatJoin {
            room_id,
            identity,
            role,
        } => {
            handle_chat_join(state, connection_id, room_id, identity, role).await;
        }
        ClientEvent::ChatMessage {
            room_id,
            text,
            sender_identity,
            sender_role,
        } => {
            handle_chat_message(state, connection_id, room_id, text, sender_identity, sender_role)
                .await;
        }
        ClientEvent::Offer {
            target_connection_id,
            session_description,
        } => {
            let from_identity = sender_identity_of(state, connection_id).await;
            let event = ServerEvent::Offer {
                from_connection_id: connection_id.as_str().to_string(),
                from_identity,
                session_description,
            };
            relay_signal(state, target_connection_id, &event).await;
        }
        ClientEvent::Answer {
            target_connection_id,
            session_description,
        } => {
            let from_identity = sender_identity_of(state, connection_id).await;
            let event = ServerEvent::Answer {
                from_connection_id: connection_id.as_str().to_string(),
                from_identity,
                session_description,
            };
            relay_signal(state, target_connection_id, &event).await;
        }
        ClientEvent::IceCandidate {
            target_connection_id,
            candidate,
        } => {
            let event = ServerEvent::IceCandidate {
                from_connection_id: connection_id.as_str().to_string(),
                candidate,
            };
            relay_signal(state, target_connection_id, &event).await;
        }
        ClientEvent::ToggleVideo { room_id, enabled } => {
            let event = ServerEvent::VideoToggled {
                connection_id: connection_id.as_str().to_string(),
                enabled,
            };
            handle_toggle_media(state, connection_id, room_id, &event).await;
        }
        ClientEvent::ToggleAudio { room_id, enabled } => {
            let event = ServerEvent::AudioToggled {
                connection_id: connection_id.as_str().to_string(),
                enabled,
            };
            handle_toggle_media(state, connection_id, room_id, &event).await;
        }
        ClientEvent::LeaveRoom { room_id } => {
            handle_leave_room(state, connection_id, room_id).await;
        }
    }
}

async fn handle_join_room(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    room_id: String,
    identity: String,
) {
    match state
        .join_room_usecase
        .execute(connection_id.clone(), room_id, identity)
        .await
    {
        Ok(outcome) => {
            // Switching rooms: peers of the old room get participant-left first
            if let Some(departure) = outcome.departed {
                let left_json = encode(&participant_left_event(&departure));
                if let Err(e) = state
                    .leave_room_usecase
                    .broadcast_participant_left(departure.notify_targets.clone(), &left_json)
                    .await
                {
                    tracing::warn!("Failed to broadcast participant-left: {}", e);
                }
            }

            // Reply to the joining client with the current participant list
            let participants: Vec<ParticipantInfo> = outcome
                .existing_participants
                .into_iter()
                .map(Into::into)
                .collect();
            let reply = ServerEvent::RoomJoined {
                room_id: outcome.room_id.as_str().to_string(),
                participants,
            };
            push_to_caller(state, connection_id, &reply).await;
            tracing::info!(
                "Connection '{}' joined room '{}'",
                connection_id.as_str(),
                outcome.room_id.as_str()
            );

            // Broadcast participant-joined to the members that were already there
            let joined = ServerEvent::ParticipantJoined {
                connection_id: outcome.participant.connection_id.as_str().to_string(),
                identity: outcome.participant.identity.as_str().to_string(),
            };
            let joined_json = encode(&joined);
            if let Err(e) = state
                .join_room_usecase
                .broadcast_participant_joined(outcome.notify_targets, &joined_json)
                .await
            {
                tracing::warn!("Failed to broadcast participant-joined: {}", e);
            }
        }
        Err(JoinRoomError::InvalidArgument(field)) => {
            send_error(state, connection_id, &format!("{} must not be empty", field)).await;
        }
        Err(JoinRoomError::Registry(e)) => {
            // Internal fault: log and leave the connection as-is. Mutations
            // are single-step, so there is no partial state to roll back.
            tracing::error!("Failed to join room: {}", e);
        }
    }
}

async fn handle_chat_join(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    room_id: String,
    identity: String,
    role: String,
) {
    match state
        .join_chat_usecase
        .execute(connection_id.clone(), room_id, identity, role)
        .await
    {
        Ok(outcome) => {
            let messages: Vec<ChatMessagePayload> =
                outcome.history.into_iter().map(Into::into).collect();
            tracing::info!(
                "Connection '{}' joined chat of room '{}' ({} messages of backlog)",
                connection_id.as_str(),
                outcome.room_id.as_str(),
                messages.len()
            );
            let reply = ServerEvent::ChatHistory {
                room_id: outcome.room_id.as_str().to_string(),
                messages,
            };
            push_to_caller(state, connection_id, &reply).await;
        }
        Err(JoinChatError::InvalidArgument(field)) => {
            send_error(state, connection_id, &format!("{} must not be empty", field)).await;
        }
    }
}

async fn handle_chat_message(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    room_id: String,
    text: String,
    sender_identity: String,
    sender_role: String,
) {
    match state
        .post_message_usecase
        .execute(connection_id, room_id, text, sender_identity, sender_role)
        .await
    {
        Ok((message, targets)) => {
            let event = ServerEvent::ChatMessage {
                message: message.into(),
            };
            let json = encode(&event);
            if let Err(e) = state
                .post_message_usecase
                .broadcast_message(targets, &json)
                .await
            {
                tracing::warn!("Failed to broadcast chat message: {}", e);
            }
        }
        Err(PostMessageError::InvalidArgument(field)) => {
            send_error(state, connection_id, &format!("invalid {}", field)).await;
        }
    }
}

async fn handle_toggle_media(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    room_id: String,
    event: &ServerEvent,
) {
    let targets = state
        .toggle_media_usecase
        .execute(connection_id, room_id)
        .await;
    if targets.is_empty() {
        // Not in the room (or alone in it): nothing to notify
        return;
    }
    let json = encode(event);
    if let Err(e) = state
        .toggle_media_usecase
        .broadcast_media_state(targets, &json)
        .await
    {
        tracing::warn!("Failed to broadcast media state: {}", e);
    }
}

async fn handle_leave_room(state: &Arc<AppState>, connection_id: &ConnectionId, room_id: String) {
    // Idempotent by contract: leaving a room you are not in is a no-op
    let Some(departure) = state
        .leave_room_usecase
        .execute(connection_id, room_id)
        .await
    else {
        return;
    };

    tracing::info!(
        "Connection '{}' left room '{}'",
        connection_id.as_str(),
        departure.room_id.as_str()
    );
    let left_json = encode(&participant_left_event(&departure));
    if let Err(e) = state
        .leave_room_usecase
        .broadcast_participant_left(departure.notify_targets.clone(), &left_json)
        .await
    {
        tracing::warn!("Failed to broadcast participant-left: {}", e);
    }
}

/// Deliver a signaling payload to its target, best-effort.
///
/// An unknown or already-disconnected target drops the payload silently:
/// the sender is never told, by design.
async fn relay_signal(state: &Arc<AppState>, target_connection_id: String, event: &ServerEvent) {
    let json = encode(event);
    state
        .relay_signal_usecase
        .execute(target_connection_id, &json)
        .await;
}

/// Look up the sender's identity for tagging relayed payloads.
///
/// A sender that never joined a room has no registered identity; relays
/// still go through with an empty tag rather than being rejected.
async fn sender_identity_of(state: &Arc<AppState>, connection_id: &ConnectionId) -> String {
    state
        .relay_signal_usecase
        .find_sender(connection_id)
        .await
        .map(|p| p.identity.into_string())
        .unwrap_or_default()
}

fn participant_left_event(departure: &RoomDeparture) -> ServerEvent {
    ServerEvent::ParticipantLeft {
        connection_id: departure.participant.connection_id.as_str().to_string(),
        identity: departure.participant.identity.as_str().to_string(),
    }
}

/// Reply to the originating connection only.
async fn push_to_caller(state: &Arc<AppState>, connection_id: &ConnectionId, event: &ServerEvent) {
    let json = encode(event);
    if let Err(e) = state.message_pusher.push_to(connection_id, &json).await {
        tracing::warn!(
            "Failed to reply to connection '{}': {}",
            connection_id.as_str(),
            e
        );
    }
}

/// Send an invalid-argument error event to the caller only.
async fn send_error(state: &Arc<AppState>, connection_id: &ConnectionId, message: &str) {
    let event = ServerEvent::Error {
        code: ErrorCode::InvalidArgument,
        message: message.to_string(),
    };
    push_to_caller(state, connection_id, &event).await;
}

fn encode(event: &ServerEvent) -> String {
    // ServerEvent is a plain data enum; serialization cannot fail
    serde_json::to_string(event).unwrap_or_else(|e| {
        tracing::error!("Failed to serialize server event: {}", e);
        Value::Null.to_string()
    })
}
