//! HTTP API response DTOs.

use serde::Serialize;

/// Room summary for the debug endpoint
#[derive(Debug, Serialize)]
pub struct RoomSummaryDto {
    pub id: String,
    pub participants: Vec<ParticipantDetailDto>,
    pub created_at: String,
}

/// Participant detail for the debug endpoint
#[derive(Debug, Serialize)]
pub struct ParticipantDetailDto {
    pub connection_id: String,
    pub identity: String,
    pub joined_at: String,
}
