//! Realtime core components for the gateway runtime.
//!
//! The connection registry and the notification hub that publishes through
//! it.

mod connection_registry;
mod hub;

pub use connection_registry::ConnectionRegistry;
pub use hub::NotificationHub;
