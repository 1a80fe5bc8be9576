use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::FuturesUnordered;
use futures_util::StreamExt;

use marquee_core::protocol::Notification;
use marquee_core::UserId;

use crate::realtime::core::ConnectionRegistry;
use crate::realtime::types::DeliveryReport;

/// NotificationHub: egress engine on top of the registry.
///
/// Publishing is best-effort and never fails the caller. A connection whose
/// send fails (closed queue, or still full after `send_timeout`) is evicted
/// and not retried. Offline users are skipped silently.
pub struct NotificationHub {
    registry: Arc<ConnectionRegistry>,
    send_timeout: Duration,
}

impl NotificationHub {
    pub fn new(registry: Arc<ConnectionRegistry>, send_timeout: Duration) -> Self {
        Self {
            registry,
            send_timeout,
        }
    }

    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    pub fn send_timeout(&self) -> Duration {
        self.send_timeout
    }

    /// Deliver to every live connection of `user`.
    pub async fn publish(&self, user: UserId, note: &Notification) -> DeliveryReport {
        let Some(frame) = prepare(note) else {
            return DeliveryReport::default();
        };
        self.publish_frame(user, &frame).await
    }

    /// Deliver to each listed user. Duplicated ids are published twice.
    /// Recipients are driven concurrently; one failing never blocks another.
    pub async fn publish_to_many(&self, users: &[UserId], note: &Notification) -> DeliveryReport {
        let Some(frame) = prepare(note) else {
            return DeliveryReport::default();
        };

        let mut futs: FuturesUnordered<_> = users
            .iter()
            .map(|&u| self.publish_frame(u, &frame))
            .collect();

        let mut report = DeliveryReport::default();
        while let Some(r) = futs.next().await {
            report += r;
        }

        tracing::debug!(
            recipients = users.len(),
            delivered = report.delivered,
            evicted = report.evicted,
            "fan-out finished"
        );
        report
    }

    async fn publish_frame(&self, user: UserId, frame: &str) -> DeliveryReport {
        let mut report = DeliveryReport::default();

        let conns = self.registry.snapshot(user);
        if conns.is_empty() {
            tracing::trace!(%user, "user offline, notification dropped");
            return report;
        }

        let send_timeout = self.send_timeout;
        let mut futs: FuturesUnordered<_> = conns
            .into_iter()
            .map(|handle| async move {
                let res = handle.send_text(frame, send_timeout).await;
                (handle.id(), res)
            })
            .collect();

        while let Some((conn, res)) = futs.next().await {
            match res {
                Ok(()) => report.delivered += 1,
                Err(reason) => {
                    if self.registry.remove(user, conn).is_some() {
                        report.evicted += 1;
                    }
                    tracing::warn!(%user, %conn, %reason, "connection evicted after failed send");
                }
            }
        }

        report
    }
}

// Serialize once per publish; every connection gets the same frame.
fn prepare(note: &Notification) -> Option<String> {
    match note.encode() {
        Ok(frame) => Some(frame),
        Err(e) => {
            tracing::error!(error = %e, "notification dropped");
            None
        }
    }
}
