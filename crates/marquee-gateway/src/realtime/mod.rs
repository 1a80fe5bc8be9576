//! Realtime runtime (egress engine) for the Marquee gateway.
//!
//! Per-user connection registry plus best-effort notification fan-out.

pub mod core;
pub mod types;

pub use core::{ConnectionRegistry, NotificationHub};
pub use types::{ConnId, ConnectionHandle, DeliveryReport, SendFailure};
