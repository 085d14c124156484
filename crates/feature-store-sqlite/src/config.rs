// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Store configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::SqliteStoreError;

/// Path that selects a private in-memory database
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Default busy timeout (ms).
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Default number of pooled connections.
pub const DEFAULT_POOL_SIZE: usize = 4;

/// Configuration for the SQLite feature store.
///
/// # Invariants
/// - `pool_size` is at least 1; an in-memory database always uses one connection.
/// - `busy_timeout_ms` is interpreted as milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqliteStoreConfig {
    /// Path to the database file, or `:memory:`
    pub path: PathBuf,
    /// Number of pooled connections
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
    /// Busy timeout in milliseconds
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

const fn default_pool_size() -> usize {
    DEFAULT_POOL_SIZE
}

const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

impl SqliteStoreConfig {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            pool_size: DEFAULT_POOL_SIZE,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(IN_MEMORY_PATH)
    }

    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    pub fn with_busy_timeout_ms(mut self, busy_timeout_ms: u64) -> Self {
        self.busy_timeout_ms = busy_timeout_ms;
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str() == IN_MEMORY_PATH
    }

    /// Connections actually opened for this configuration
    pub fn effective_pool_size(&self) -> usize {
        if self.is_in_memory() {
            1
        } else {
            self.pool_size
        }
    }

    pub fn validate(&self) -> Result<(), SqliteStoreError> {
        if self.path.as_os_str().is_empty() {
            return Err(SqliteStoreError::Invalid("database path is empty".to_string()));
        }
        if self.pool_size == 0 {
            return Err(SqliteStoreError::Invalid("pool_size must be at least 1".to_string()));
        }
        if self.busy_timeout_ms == 0 {
            return Err(SqliteStoreError::Invalid(
                "busy_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SqliteStoreConfig {
    fn default() -> Self {
        Self::new("features.db")
    }
}
