//! Transport layer (WebSocket).
//!
//! Exposes the WS upgrade handler that feeds the connection registry.

pub mod ws;
