use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CommentId, UserId};

/// One comment row as loaded for a review (flat, parent-referencing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    /// Comment this one replies to; `None` for a top-level comment.
    #[serde(default)]
    pub parent_id: Option<CommentId>,
    pub content: String,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
}
