//! Marquee core: transport-agnostic ids, error types, the notification wire
//! payload, and the comment thread model.
//!
//! Nothing here depends on a runtime or a socket, so the CRUD backend can use
//! the comment tree builder directly while the gateway uses the same ids and
//! payloads for push delivery.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod comments;
pub mod error;
pub mod ids;
pub mod protocol;

/// Shared result type.
pub use error::{MarqueeError, Result};
pub use ids::{CommentId, MovieId, UserId};
