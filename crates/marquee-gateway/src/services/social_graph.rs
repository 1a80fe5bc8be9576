use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use marquee_core::error::{MarqueeError, Result};
use marquee_core::UserId;

/// Follower lookup backed by the relational store in production.
#[async_trait]
pub trait SocialGraph: Send + Sync {
    /// Users following `user`, in follow order.
    async fn follower_ids(&self, user: UserId) -> Result<Vec<UserId>>;
}

/// In-process follow index: `followed -> [follower...]`.
#[derive(Default)]
pub struct InMemorySocialGraph {
    followers: DashMap<UserId, Vec<UserId>>,
}

impl InMemorySocialGraph {
    pub fn new() -> Self {
        Self {
            followers: DashMap::new(),
        }
    }

    pub fn follow(&self, follower: UserId, followed: UserId) -> Result<()> {
        if follower == followed {
            return Err(MarqueeError::BadRequest("cannot follow yourself".into()));
        }
        let mut list = self.followers.entry(followed).or_default();
        if list.contains(&follower) {
            return Err(MarqueeError::BadRequest("already following".into()));
        }
        list.push(follower);
        Ok(())
    }

    /// Returns whether a follow edge was removed.
    pub fn unfollow(&self, follower: UserId, followed: UserId) -> bool {
        match self.followers.entry(followed) {
            Entry::Occupied(mut e) => {
                let before = e.get().len();
                e.get_mut().retain(|&f| f != follower);
                let removed = e.get().len() != before;
                if e.get().is_empty() {
                    e.remove();
                }
                removed
            }
            Entry::Vacant(_) => false,
        }
    }
}

#[async_trait]
impl SocialGraph for InMemorySocialGraph {
    async fn follower_ids(&self, user: UserId) -> Result<Vec<UserId>> {
        Ok(self
            .followers
            .get(&user)
            .map(|list| list.value().clone())
            .unwrap_or_default())
    }
}
