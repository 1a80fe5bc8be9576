use std::sync::Arc;

use marquee_core::protocol::Notification;
use marquee_core::{MovieId, UserId};

use crate::realtime::{DeliveryReport, NotificationHub};
use crate::services::SocialGraph;

/// Pushes "new review" notifications to the author's followers.
pub struct ReviewNotifier {
    hub: Arc<NotificationHub>,
    graph: Arc<dyn SocialGraph>,
}

impl ReviewNotifier {
    pub fn new(hub: Arc<NotificationHub>, graph: Arc<dyn SocialGraph>) -> Self {
        Self { hub, graph }
    }

    /// Call after the review row is committed. Never fails: a follower
    /// lookup error only skips the fan-out.
    pub async fn review_created(&self, author: UserId, movie: MovieId) -> DeliveryReport {
        let followers = match self.graph.follower_ids(author).await {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!(%author, %movie, error = %e, "follower lookup failed, skipping fan-out");
                return DeliveryReport::default();
            }
        };

        let note = Notification::review_created(author, movie);
        self.hub.publish_to_many(&followers, &note).await
    }
}
