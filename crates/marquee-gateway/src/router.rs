//! Axum router wiring (HTTP -> WS upgrade).
//!
//! Exposes a single `/ws` route; the CRUD API lives in another service.

use axum::{routing::get, Router};

use crate::{app_state::AppState, transport};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ws", get(transport::ws::ws_upgrade))
        .with_state(state)
}
