// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # feature-store-sqlite
//!
//! Relational [`FeatureStore`](feature_services::FeatureStore) backed by SQLite.
//!
//! Connections are held in a small fixed pool; every store call runs on
//! tokio's blocking pool and borrows one connection for one statement.
//!
//! ```rust,no_run
//! use feature_store_sqlite::{SqliteFeatureStore, SqliteStoreConfig};
//!
//! let store = SqliteFeatureStore::open(SqliteStoreConfig::new("features.db"))?;
//! # Ok::<(), feature_store_sqlite::SqliteStoreError>(())
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod error;
mod pool;
mod schema;
pub mod store;

pub use config::SqliteStoreConfig;
pub use error::SqliteStoreError;
pub use store::SqliteFeatureStore;
