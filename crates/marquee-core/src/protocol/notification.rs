//! Outbound notification frame (JSON).
//!
//! Every push to a client is a single text frame of the shape
//! `{"message": "<text>"}`. The shape is fixed; new event kinds only add
//! constructors that render into `message`.

use serde::{Deserialize, Serialize};

use crate::error::{MarqueeError, Result};
use crate::ids::{MovieId, UserId};

/// Notification pushed to a user's live connections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Notification {
    message: String,
}

impl Notification {
    /// Plain text notification.
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Sent to every follower of `author` after a review is committed.
    pub fn review_created(author: UserId, movie: MovieId) -> Self {
        Self::text(format!("User {author} wrote review on film {movie}"))
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Serialize to the wire frame text.
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| MarqueeError::Internal(format!("notification encode failed: {e}")))
    }
}
