use std::collections::HashMap;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use marquee_core::UserId;

use crate::realtime::types::{ConnId, ConnectionHandle};

/// Connection registry: `user -> {conn_id -> handle}`.
///
/// Every operation holds one shard guard for its whole duration, so
/// "remove the handle, then drop the empty set" cannot interleave with an
/// `add` for the same user. No per-user entry is ever left empty.
#[derive(Default)]
pub struct ConnectionRegistry {
    users: DashMap<UserId, HashMap<ConnId, ConnectionHandle>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
        }
    }

    pub fn add(&self, user: UserId, handle: ConnectionHandle) {
        let conn = handle.id();
        let open = {
            let mut set = self.users.entry(user).or_default();
            set.insert(conn, handle);
            set.len()
        };
        tracing::info!(%user, %conn, open, "user connected");
    }

    /// Remove one connection. Absent user or handle is a no-op (`None`):
    /// the session task and a failed publish may both try to remove it.
    pub fn remove(&self, user: UserId, conn: ConnId) -> Option<ConnectionHandle> {
        let removed = match self.users.entry(user) {
            Entry::Occupied(mut e) => {
                let handle = e.get_mut().remove(&conn);
                if e.get().is_empty() {
                    e.remove();
                }
                handle
            }
            Entry::Vacant(_) => None,
        };
        if removed.is_some() {
            tracing::info!(%user, %conn, "user disconnected");
        }
        removed
    }

    /// Point-in-time copy of the user's handles.
    pub fn snapshot(&self, user: UserId) -> Vec<ConnectionHandle> {
        self.users
            .get(&user)
            .map(|set| set.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn count_user_connections(&self, user: UserId) -> usize {
        self.users.get(&user).map(|set| set.len()).unwrap_or(0)
    }

    pub fn is_connected(&self, user: UserId, conn: ConnId) -> bool {
        self.users
            .get(&user)
            .map(|set| set.contains_key(&conn))
            .unwrap_or(false)
    }

    /// Users with at least one live connection.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn connection_count(&self) -> usize {
        self.users.iter().map(|e| e.value().len()).sum()
    }
}
