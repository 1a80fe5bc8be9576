//! Marquee gateway library entry.
//!
//! Wires the WebSocket transport, the connection registry, the notification
//! hub, and the review event fan-out. Consumed by the binary (`main.rs`), by
//! the CRUD backend that publishes events, and by integration tests.

pub mod app_state;
pub mod config;
pub mod realtime;
pub mod router;
pub mod services;
pub mod transport;
