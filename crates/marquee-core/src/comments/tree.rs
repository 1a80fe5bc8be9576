//! Reply-tree reconstruction.
//!
//! Comments are loaded flat (usually `created_at ASC`) and reshaped into a
//! forest. Nodes live in an arena; links are indices, so there is no shared
//! ownership and no parent back-pointer.
//!
//! Linking rules:
//! - no `parent_id` => root
//! - `parent_id` resolving to another record in the batch => child of it
//! - `parent_id` missing from the batch, or pointing at itself => root
//!
//! Records caught in a parent cycle, and their descendants, are unreachable
//! from any root after linking. For each such record in input order the
//! builder follows parent links to the first repeated index and promotes that
//! cycle member to a root. Records hanging off a cycle stay under their
//! parent, and each record is emitted exactly once.
//!
//! Conversion to nested threads and dropping them are both iterative, so
//! reply depth is bounded by memory, not by the call stack.

use std::collections::HashMap;

use serde::Serialize;

use crate::comments::model::Comment;
use crate::ids::CommentId;

/// Arena form of a comment forest.
#[derive(Debug, Clone, Default)]
pub struct CommentForest {
    nodes: Vec<Comment>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
}

/// Owned nested form, serialized as the comment plus its `replies`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentThread {
    #[serde(flatten)]
    pub comment: Comment,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub replies: Vec<CommentThread>,
}

impl CommentForest {
    /// Link `comments` into a forest. Input order is kept for roots and for
    /// every child list.
    pub fn build(comments: Vec<Comment>) -> Self {
        let n = comments.len();

        // First occurrence owns the id.
        let mut index: HashMap<CommentId, usize> = HashMap::with_capacity(n);
        for (i, c) in comments.iter().enumerate() {
            index.entry(c.id).or_insert(i);
        }

        let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut parent: Vec<Option<usize>> = vec![None; n];
        let mut roots = Vec::new();

        for (i, c) in comments.iter().enumerate() {
            match c.parent_id.and_then(|p| index.get(&p).copied()) {
                Some(p) if p != i => {
                    if let Some(list) = children.get_mut(p) {
                        list.push(i);
                    }
                    parent[i] = Some(p);
                }
                _ => roots.push(i),
            }
        }

        let mut reachable = vec![false; n];
        for &r in &roots {
            mark_subtree(&children, r, &mut reachable);
        }

        let mut walked = vec![usize::MAX; n];
        for i in 0..n {
            if reachable[i] {
                continue;
            }
            let head = cycle_member(i, &parent, &mut walked);
            if let Some(p) = parent[head].take() {
                if let Some(list) = children.get_mut(p) {
                    list.retain(|&c| c != head);
                }
            }
            let pos = roots.partition_point(|&r| r < head);
            roots.insert(pos, head);
            mark_subtree(&children, head, &mut reachable);
        }

        Self {
            nodes: comments,
            children,
            roots,
        }
    }

    /// Arena indices of the top-level comments.
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Arena indices of the direct replies to `idx`.
    pub fn children(&self, idx: usize) -> &[usize] {
        self.children.get(idx).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get(&self, idx: usize) -> Option<&Comment> {
        self.nodes.get(idx)
    }

    /// Arena index of the first record carrying `id`.
    pub fn position(&self, id: CommentId) -> Option<usize> {
        self.nodes.iter().position(|c| c.id == id)
    }

    pub fn has_replies(&self, idx: usize) -> bool {
        !self.children(idx).is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Consume the arena into owned nested threads.
    pub fn into_threads(self) -> Vec<CommentThread> {
        let Self {
            nodes,
            children,
            roots,
        } = self;
        let mut slots: Vec<Option<Comment>> = nodes.into_iter().map(Some).collect();
        let mut built: Vec<Option<CommentThread>> = Vec::new();
        built.resize_with(slots.len(), || None);

        // Post-order: a node is assembled once all of its replies are.
        let mut stack: Vec<(usize, bool)> = roots.iter().rev().map(|&r| (r, false)).collect();
        while let Some((idx, expanded)) = stack.pop() {
            let kids = children.get(idx).map(Vec::as_slice).unwrap_or(&[]);
            if !expanded {
                stack.push((idx, true));
                stack.extend(kids.iter().rev().map(|&c| (c, false)));
                continue;
            }
            let Some(comment) = slots.get_mut(idx).and_then(Option::take) else {
                continue;
            };
            let replies = kids
                .iter()
                .filter_map(|&c| built.get_mut(c).and_then(Option::take))
                .collect();
            if let Some(slot) = built.get_mut(idx) {
                *slot = Some(CommentThread { comment, replies });
            }
        }

        roots
            .iter()
            .filter_map(|&r| built.get_mut(r).and_then(Option::take))
            .collect()
    }
}

/// Build the nested reply tree for one review's comments.
pub fn build_comment_tree(comments: Vec<Comment>) -> Vec<CommentThread> {
    CommentForest::build(comments).into_threads()
}

fn mark_subtree(children: &[Vec<usize>], start: usize, reachable: &mut [bool]) {
    let mut stack = vec![start];
    while let Some(i) = stack.pop() {
        match reachable.get_mut(i) {
            Some(seen) if !*seen => *seen = true,
            _ => continue,
        }
        if let Some(kids) = children.get(i) {
            stack.extend(kids.iter().copied());
        }
    }
}

/// Follow parent links from an unreachable `start` until an index repeats.
/// Unreachable records never lead to a root, so the walk ends on a cycle.
fn cycle_member(start: usize, parent: &[Option<usize>], walked: &mut [usize]) -> usize {
    let mut at = start;
    loop {
        if walked[at] == start {
            return at;
        }
        walked[at] = start;
        match parent[at] {
            Some(p) => at = p,
            None => return at,
        }
    }
}

impl Drop for CommentThread {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.replies);
        while let Some(mut thread) = pending.pop() {
            pending.append(&mut thread.replies);
        }
    }
}
