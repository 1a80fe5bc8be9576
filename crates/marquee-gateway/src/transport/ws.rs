//! WebSocket connection lifecycle.
//!
//! Responsibilities:
//! - Upgrade HTTP -> WS for an already-authenticated `user_id`
//! - Register one `ConnectionHandle` per socket, remove it when the session ends
//! - Forward hub frames from the outbound queue to the socket
//! - Ping/pong + idle timeout
//!
//! The session task keeps only the receiver side of the outbound queue. Once
//! the hub evicts the handle and the last sender is dropped, `recv()` yields
//! `None` and the session closes.

use axum::{
    extract::{ws::Message, ws::WebSocket, ws::WebSocketUpgrade, Query, State},
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio::time::{Duration, Instant, MissedTickBehavior};
use tracing::Instrument;

use marquee_core::UserId;

use crate::app_state::AppState;
use crate::realtime::ConnectionHandle;

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    pub user_id: UserId,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CloseReason {
    ClientClosed,
    ReadError,
    WriteFailed,
    Evicted,
    IdleTimeout,
}

impl CloseReason {
    fn as_str(self) -> &'static str {
        match self {
            CloseReason::ClientClosed => "client_closed",
            CloseReason::ReadError => "read_error",
            CloseReason::WriteFailed => "write_failed",
            CloseReason::Evicted => "evicted",
            CloseReason::IdleTimeout => "idle_timeout",
        }
    }
}

pub async fn ws_upgrade(
    State(app): State<AppState>,
    ws: WebSocketUpgrade,
    Query(q): Query<WsQuery>,
) -> Response {
    ws.on_upgrade(move |socket| run_session(app, q.user_id, socket))
}

async fn run_session(app: AppState, user: UserId, socket: WebSocket) {
    let registry = app.registry();
    let (handle, out_rx) = ConnectionHandle::channel(app.cfg().hub.outbound_queue);
    let conn = handle.id();
    registry.add(user, handle);

    let span = tracing::info_span!("session", %user, %conn);
    let reason = drive(&app, socket, out_rx).instrument(span.clone()).await;

    registry.remove(user, conn);
    span.in_scope(|| tracing::debug!(reason = reason.as_str(), "session ended"));
}

async fn drive(app: &AppState, socket: WebSocket, mut out_rx: mpsc::Receiver<Message>) -> CloseReason {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let gw = &app.cfg().gateway;
    let ping_every = Duration::from_millis(gw.ping_interval_ms);
    let idle_timeout = Duration::from_millis(gw.idle_timeout_ms);

    let mut ping_tick = tokio::time::interval_at(Instant::now() + ping_every, ping_every);
    ping_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut last_activity = Instant::now();

    let reason = loop {
        tokio::select! {
            // outbound writer
            maybe_out = out_rx.recv() => {
                let Some(frame) = maybe_out else { break CloseReason::Evicted; };
                if ws_tx.send(frame).await.is_err() {
                    break CloseReason::WriteFailed;
                }
            }

            // inbound reader: clients only listen, payloads are ignored
            incoming = ws_rx.next() => {
                match incoming {
                    None | Some(Ok(Message::Close(_))) => break CloseReason::ClientClosed,
                    Some(Err(e)) => {
                        tracing::debug!(error = %e, "read failed");
                        break CloseReason::ReadError;
                    }
                    Some(Ok(Message::Ping(payload))) => {
                        last_activity = Instant::now();
                        if ws_tx.send(Message::Pong(payload)).await.is_err() {
                            break CloseReason::WriteFailed;
                        }
                    }
                    Some(Ok(_)) => {
                        last_activity = Instant::now();
                    }
                }
            }

            _ = ping_tick.tick() => {
                if ws_tx.send(Message::Ping(Vec::new())).await.is_err() {
                    break CloseReason::WriteFailed;
                }
            }

            _ = tokio::time::sleep_until(last_activity + idle_timeout) => {
                break CloseReason::IdleTimeout;
            }
        }
    };

    if matches!(reason, CloseReason::Evicted | CloseReason::IdleTimeout) {
        let _ = ws_tx.send(Message::Close(None)).await;
    }
    reason
}
