//! Shared utilities for the Oshin signaling relay.
//!
//! Cross-cutting concerns used by both the server and its tests:
//! logging setup and time handling.

pub mod logger;
pub mod time;
