//! Content and deletion rules for comments.

use crate::comments::model::Comment;
use crate::error::{MarqueeError, Result};

/// Upper bound on a comment body, in bytes.
pub const MAX_CONTENT_BYTES: usize = 5000;

/// Body left in place of a deleted comment that still has replies.
pub const TOMBSTONE: &str = "[deleted]";

/// Reject empty or oversized comment bodies.
pub fn validate_content(content: &str) -> Result<()> {
    if content.is_empty() {
        return Err(MarqueeError::ContentEmpty);
    }
    if content.len() > MAX_CONTENT_BYTES {
        return Err(MarqueeError::ContentTooLong {
            max: MAX_CONTENT_BYTES,
        });
    }
    Ok(())
}

/// How a delete request is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePlan {
    /// Keep the row so replies stay attached; blank out the body.
    Tombstone,
    /// No replies depend on it; soft-delete the row.
    SoftDelete,
}

impl DeletePlan {
    pub fn for_comment(has_replies: bool) -> Self {
        if has_replies {
            DeletePlan::Tombstone
        } else {
            DeletePlan::SoftDelete
        }
    }
}

impl Comment {
    /// Replace the body with the tombstone marker.
    pub fn tombstone(&mut self) {
        self.content = TOMBSTONE.to_string();
    }

    pub fn is_tombstoned(&self) -> bool {
        self.content == TOMBSTONE
    }
}
