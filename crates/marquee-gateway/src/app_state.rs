//! Shared application state for the Marquee gateway.
//!
//! The registry is created here and owned through the hub; there is no
//! process-global instance. Dropping the last `AppState` clone drops every
//! remaining connection handle.

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::realtime::{ConnectionRegistry, NotificationHub};
use crate::services::{ReviewNotifier, SocialGraph};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    hub: Arc<NotificationHub>,
}

struct AppStateInner {
    cfg: GatewayConfig,
}

impl AppState {
    pub fn new(cfg: GatewayConfig) -> Self {
        let registry = Arc::new(ConnectionRegistry::new());
        let hub = Arc::new(NotificationHub::new(registry, cfg.hub.send_timeout()));

        Self {
            inner: Arc::new(AppStateInner { cfg }),
            hub,
        }
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn hub(&self) -> Arc<NotificationHub> {
        Arc::clone(&self.hub)
    }

    pub fn registry(&self) -> Arc<ConnectionRegistry> {
        Arc::clone(self.hub.registry())
    }

    /// Review fan-out wired to this gateway's hub.
    pub fn review_notifier(&self, graph: Arc<dyn SocialGraph>) -> ReviewNotifier {
        ReviewNotifier::new(self.hub(), graph)
    }
}
