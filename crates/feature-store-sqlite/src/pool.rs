// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Fixed-size connection pool

use parking_lot::{Mutex, MutexGuard};
use rusqlite::Connection;
use std::sync::atomic::{AtomicUsize, Ordering};

pub(crate) struct ConnectionPool {
    connections: Vec<Mutex<Connection>>,
    cursor: AtomicUsize,
}

impl ConnectionPool {
    /// `connections` must not be empty.
    pub(crate) fn new(connections: Vec<Connection>) -> Self {
        Self {
            connections: connections.into_iter().map(Mutex::new).collect(),
            cursor: AtomicUsize::new(0),
        }
    }

    pub(crate) fn size(&self) -> usize {
        self.connections.len()
    }

    /// Borrow a connection: the first idle one from a round-robin start,
    /// otherwise wait on the start slot.
    pub(crate) fn acquire(&self) -> MutexGuard<'_, Connection> {
        let len = self.connections.len();
        let start = self.cursor.fetch_add(1, Ordering::Relaxed) % len;
        for offset in 0..len {
            if let Some(guard) = self.connections[(start + offset) % len].try_lock() {
                return guard;
            }
        }
        self.connections[start].lock()
    }
}
