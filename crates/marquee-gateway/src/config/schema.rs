use std::time::Duration;

use serde::Deserialize;
use marquee_core::error::{MarqueeError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub hub: HubSection,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MarqueeError::UnsupportedVersion);
        }

        self.gateway.validate()?;
        self.hub.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_ping_interval_ms")]
    pub ping_interval_ms: u64,

    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            ping_interval_ms: default_ping_interval_ms(),
            idle_timeout_ms: default_idle_timeout_ms(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        if !(5000..=120000).contains(&self.ping_interval_ms) {
            return Err(MarqueeError::BadRequest(
                "gateway.ping_interval_ms must be between 5000 and 120000".into(),
            ));
        }
        if !(10000..=600000).contains(&self.idle_timeout_ms) {
            return Err(MarqueeError::BadRequest(
                "gateway.idle_timeout_ms must be between 10000 and 600000".into(),
            ));
        }
        if self.idle_timeout_ms <= self.ping_interval_ms {
            return Err(MarqueeError::BadRequest(
                "gateway.idle_timeout_ms must be greater than ping_interval_ms".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_ping_interval_ms() -> u64 {
    20000
}
fn default_idle_timeout_ms() -> u64 {
    60000
}

/// Notification hub tuning.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HubSection {
    /// Upper bound on one send to a full connection queue; exceeding it evicts.
    #[serde(default = "default_send_timeout_ms")]
    pub send_timeout_ms: u64,

    /// Per-connection outbound queue capacity (frames).
    #[serde(default = "default_outbound_queue")]
    pub outbound_queue: usize,
}

impl Default for HubSection {
    fn default() -> Self {
        Self {
            send_timeout_ms: default_send_timeout_ms(),
            outbound_queue: default_outbound_queue(),
        }
    }
}

impl HubSection {
    pub fn validate(&self) -> Result<()> {
        if !(10..=30000).contains(&self.send_timeout_ms) {
            return Err(MarqueeError::BadRequest(
                "hub.send_timeout_ms must be between 10 and 30000".into(),
            ));
        }
        if !(1..=65536).contains(&self.outbound_queue) {
            return Err(MarqueeError::BadRequest(
                "hub.outbound_queue must be between 1 and 65536".into(),
            ));
        }
        Ok(())
    }

    pub fn send_timeout(&self) -> Duration {
        Duration::from_millis(self.send_timeout_ms)
    }
}

fn default_send_timeout_ms() -> u64 {
    1000
}
fn default_outbound_queue() -> usize {
    256
}
