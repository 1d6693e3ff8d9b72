//! Signaling relay library for the Oshin telemedicine service.
//!
//! Coordinates video-call rooms over WebSocket connections: participant
//! join/leave tracking, pairwise relay of WebRTC offer/answer/ICE payloads,
//! media-toggle broadcasts and bounded per-room chat history.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
