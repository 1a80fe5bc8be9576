use std::fmt;
use std::ops::AddAssign;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use axum::extract::ws::Message;
use thiserror::Error;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::time::timeout;

static NEXT_CONN_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique connection identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnId(u64);

impl ConnId {
    fn next() -> Self {
        ConnId(NEXT_CONN_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a send to one connection failed. Either way the connection is
/// considered dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SendFailure {
    #[error("connection closed")]
    Closed,
    #[error("send timed out")]
    TimedOut,
}

/// One live connection: its id plus the sender side of the outbound queue
/// drained by the session task.
#[derive(Clone)]
pub struct ConnectionHandle {
    id: ConnId,
    tx: mpsc::Sender<Message>,
}

impl ConnectionHandle {
    pub fn new(tx: mpsc::Sender<Message>) -> Self {
        Self {
            id: ConnId::next(),
            tx,
        }
    }

    /// Handle plus the receiver the session task drains into the socket.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Message>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self::new(tx), rx)
    }

    pub fn id(&self) -> ConnId {
        self.id
    }

    /// Enqueue one text frame. Fast path is `try_send`; a full queue gets at
    /// most `send_timeout` to drain.
    pub(crate) async fn send_text(
        &self,
        frame: &str,
        send_timeout: Duration,
    ) -> Result<(), SendFailure> {
        match self.tx.try_send(Message::Text(frame.to_owned())) {
            Ok(()) => Ok(()),
            Err(TrySendError::Closed(_)) => Err(SendFailure::Closed),
            Err(TrySendError::Full(msg)) => match timeout(send_timeout, self.tx.send(msg)).await {
                Ok(Ok(())) => Ok(()),
                Ok(Err(_)) => Err(SendFailure::Closed),
                Err(_) => Err(SendFailure::TimedOut),
            },
        }
    }
}

impl fmt::Debug for ConnectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionHandle")
            .field("id", &self.id)
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

/// Outcome of one publish call. Informational only; publishing never fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Frames accepted by a connection queue.
    pub delivered: usize,
    /// Connections removed from the registry by this call.
    pub evicted: usize,
}

impl AddAssign for DeliveryReport {
    fn add_assign(&mut self, rhs: Self) {
        self.delivered += rhs.delivered;
        self.evicted += rhs.evicted;
    }
}
