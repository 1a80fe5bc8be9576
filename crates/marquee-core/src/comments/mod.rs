//! Review comments: flat record, threaded view, and mutation rules.

pub mod model;
pub mod policy;
pub mod tree;

pub use model::Comment;
pub use policy::{validate_content, DeletePlan, MAX_CONTENT_BYTES, TOMBSTONE};
pub use tree::{build_comment_tree, CommentForest, CommentThread};
