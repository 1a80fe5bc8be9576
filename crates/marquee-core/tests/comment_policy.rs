//! Comment content and deletion rules.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use chrono::DateTime;

use marquee_core::comments::{
    validate_content, Comment, CommentForest, DeletePlan, MAX_CONTENT_BYTES, TOMBSTONE,
};
use marquee_core::{CommentId, UserId};

#[test]
fn empty_content_is_rejected() {
    let err = validate_content("").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "CONTENT_EMPTY");
}

#[test]
fn content_limit_is_counted_in_bytes() {
    assert!(validate_content(&"a".repeat(MAX_CONTENT_BYTES)).is_ok());

    let err = validate_content(&"a".repeat(MAX_CONTENT_BYTES + 1)).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "CONTENT_TOO_LONG");

    // two bytes per char
    assert!(validate_content(&"é".repeat(MAX_CONTENT_BYTES / 2)).is_ok());
    assert!(validate_content(&"é".repeat(MAX_CONTENT_BYTES / 2 + 1)).is_err());
}

#[test]
fn delete_plan_depends_on_replies() {
    let forest = CommentForest::build(vec![
        Comment {
            id: CommentId(1),
            parent_id: None,
            content: "parent".into(),
            author_id: UserId(1),
            created_at: DateTime::from_timestamp(10, 0).unwrap(),
        },
        Comment {
            id: CommentId(2),
            parent_id: Some(CommentId(1)),
            content: "reply".into(),
            author_id: UserId(2),
            created_at: DateTime::from_timestamp(20, 0).unwrap(),
        },
    ]);

    let parent = forest.position(CommentId(1)).unwrap();
    let reply = forest.position(CommentId(2)).unwrap();
    assert_eq!(
        DeletePlan::for_comment(forest.has_replies(parent)),
        DeletePlan::Tombstone
    );
    assert_eq!(
        DeletePlan::for_comment(forest.has_replies(reply)),
        DeletePlan::SoftDelete
    );
}

#[test]
fn tombstone_replaces_body() {
    let mut c = Comment {
        id: CommentId(9),
        parent_id: None,
        content: "spoilers".into(),
        author_id: UserId(3),
        created_at: DateTime::from_timestamp(0, 0).unwrap(),
    };
    assert!(!c.is_tombstoned());
    c.tombstone();
    assert!(c.is_tombstoned());
    assert_eq!(c.content, TOMBSTONE);
}
