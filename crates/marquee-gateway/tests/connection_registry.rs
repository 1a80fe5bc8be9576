//! Connection registry bookkeeping and race behaviour.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;

use marquee_core::UserId;
use marquee_gateway::realtime::{ConnectionHandle, ConnectionRegistry};

fn handle() -> ConnectionHandle {
    ConnectionHandle::channel(1).0
}

#[test]
fn add_creates_user_entry_and_keeps_every_tab() {
    let reg = ConnectionRegistry::new();
    let (a, b) = (handle(), handle());
    let (a_id, b_id) = (a.id(), b.id());

    reg.add(UserId(1), a);
    reg.add(UserId(1), b);

    assert_eq!(reg.user_count(), 1);
    assert_eq!(reg.count_user_connections(UserId(1)), 2);
    assert!(reg.is_connected(UserId(1), a_id));
    assert!(reg.is_connected(UserId(1), b_id));
    assert!(!reg.is_connected(UserId(2), a_id));
}

#[test]
fn removing_last_connection_drops_user_entry() {
    let reg = ConnectionRegistry::new();
    let (a, b) = (handle(), handle());
    let (a_id, b_id) = (a.id(), b.id());
    reg.add(UserId(1), a);
    reg.add(UserId(1), b);

    assert_eq!(reg.remove(UserId(1), a_id).map(|h| h.id()), Some(a_id));
    assert_eq!(reg.user_count(), 1);

    assert!(reg.remove(UserId(1), b_id).is_some());
    assert_eq!(reg.user_count(), 0);
    assert_eq!(reg.connection_count(), 0);
    assert!(reg.snapshot(UserId(1)).is_empty());
}

#[test]
fn double_remove_is_a_noop() {
    let reg = ConnectionRegistry::new();
    let (a, b) = (handle(), handle());
    let a_id = a.id();
    reg.add(UserId(1), a);
    reg.add(UserId(1), b);

    assert!(reg.remove(UserId(1), a_id).is_some());
    assert!(reg.remove(UserId(1), a_id).is_none());
    assert_eq!(reg.count_user_connections(UserId(1)), 1);

    // unknown user
    assert!(reg.remove(UserId(9), a_id).is_none());
    assert_eq!(reg.user_count(), 1);
}

#[test]
fn remove_requires_matching_user() {
    let reg = ConnectionRegistry::new();
    let a = handle();
    let a_id = a.id();
    reg.add(UserId(1), a);

    assert!(reg.remove(UserId(2), a_id).is_none());
    assert!(reg.is_connected(UserId(1), a_id));
}

#[test]
fn snapshot_is_point_in_time() {
    let reg = ConnectionRegistry::new();
    reg.add(UserId(1), handle());

    let snap = reg.snapshot(UserId(1));
    reg.add(UserId(1), handle());
    let first = snap[0].id();
    reg.remove(UserId(1), first);

    assert_eq!(snap.len(), 1);
    assert_eq!(snap[0].id(), first);
    assert_eq!(reg.count_user_connections(UserId(1)), 1);
}

#[test]
fn concurrent_add_remove_loses_nothing() {
    let reg = Arc::new(ConnectionRegistry::new());
    let threads = 8;
    let per_thread = 200;

    let workers: Vec<_> = (0..threads)
        .map(|_| {
            let reg = Arc::clone(&reg);
            thread::spawn(move || {
                let mut kept = Vec::new();
                let mut dropped = Vec::new();
                for i in 0..per_thread {
                    // a few users shared by every thread
                    let user = UserId((i % 4) as u64);
                    let h = handle();
                    let id = h.id();
                    reg.add(user, h);
                    if i % 2 == 0 {
                        assert!(reg.remove(user, id).is_some());
                        dropped.push((user, id));
                    } else {
                        kept.push((user, id));
                    }
                }
                (kept, dropped)
            })
        })
        .collect();

    let mut kept = Vec::new();
    let mut dropped = Vec::new();
    for w in workers {
        let (k, d) = w.join().unwrap();
        kept.extend(k);
        dropped.extend(d);
    }

    assert_eq!(reg.connection_count(), threads * per_thread / 2);
    for (user, id) in kept {
        assert!(reg.is_connected(user, id));
    }
    for (user, id) in dropped {
        assert!(!reg.is_connected(user, id));
    }
}

#[test]
fn racing_removers_leave_no_empty_entries() {
    let reg = Arc::new(ConnectionRegistry::new());
    let user = UserId(42);
    let ids: Vec<_> = (0..500)
        .map(|_| {
            let h = handle();
            let id = h.id();
            reg.add(user, h);
            id
        })
        .collect();
    let ids = Arc::new(ids);

    // Every id is removed by several threads at once, like a disconnect racing
    // a failed-send eviction.
    let workers: Vec<_> = (0..4)
        .map(|_| {
            let reg = Arc::clone(&reg);
            let ids = Arc::clone(&ids);
            thread::spawn(move || {
                ids.iter()
                    .filter(|&&id| reg.remove(user, id).is_some())
                    .count()
            })
        })
        .collect();

    let removed: usize = workers.into_iter().map(|w| w.join().unwrap()).sum();
    assert_eq!(removed, 500);
    assert_eq!(reg.user_count(), 0);
    assert!(reg.snapshot(user).is_empty());
}
