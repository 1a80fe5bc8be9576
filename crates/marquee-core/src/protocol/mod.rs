//! Wire formats pushed to clients.
//!
//! Only the outbound direction is modelled: clients are passive listeners and
//! whatever they send on the socket is ignored by the gateway.

pub mod notification;

pub use notification::Notification;
