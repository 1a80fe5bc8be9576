//! Marquee notification gateway.
//!
//! - WebSocket endpoint: /ws?user_id=...
//! - Per-user connection registry, best-effort push
//! - Heartbeat ping + idle timeout
//! - Graceful shutdown on ctrl-c

use std::net::SocketAddr;

use tracing_subscriber::{fmt, EnvFilter};

use marquee_core::error::{MarqueeError, Result};
use marquee_gateway::{app_state, config, router};

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::var("MARQUEE_CONFIG").unwrap_or_else(|_| "marquee.yaml".to_string());
    let cfg = config::load_from_file(&path)?;
    let listen: SocketAddr = cfg.gateway.listen.parse().map_err(|e| {
        MarqueeError::BadRequest(format!("gateway.listen must be a valid SocketAddr: {e}"))
    })?;

    let state = app_state::AppState::new(cfg);
    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "marquee-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| MarqueeError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| MarqueeError::Internal(format!("server failed: {e}")))?;

    tracing::info!("marquee-gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c listener failed, running until killed");
        std::future::pending::<()>().await;
    }
}
