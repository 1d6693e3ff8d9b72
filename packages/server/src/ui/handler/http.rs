//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{ParticipantDetailDto, RoomSummaryDto},
    ui::state::AppState,
};
use oshin_shared::time::timestamp_to_jst_rfc3339;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Debug endpoint: current rooms with their participants
///
/// The tool of choice when hunting ghost participants: if a connection is
/// listed here after its client went away, the disconnect path missed it.
pub async fn debug_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    let summaries: Vec<RoomSummaryDto> = rooms
        .into_iter()
        .map(|room| RoomSummaryDto {
            id: room.id.as_str().to_string(),
            participants: room
                .participants
                .iter()
                .map(|p| ParticipantDetailDto {
                    connection_id: p.connection_id.as_str().to_string(),
                    identity: p.identity.as_str().to_string(),
                    joined_at: timestamp_to_jst_rfc3339(p.joined_at.value()),
                })
                .collect(),
            created_at: timestamp_to_jst_rfc3339(room.created_at.value()),
        })
        .collect();

    Json(summaries)
}
