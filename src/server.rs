// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Wiring from configuration to a ready router
//!
//! Construction is explicit: the store is opened from `[database]`, handed
//! to the service, and both go into the API state.

use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tracing::info;

use feature_api::{create_http_server, ApiState};
use feature_config::{DatabaseBackend, DatabaseConfig, FeatureConfig};
use feature_services::{FeatureServiceImpl, FeatureStore, InMemoryFeatureStore};
use feature_store_sqlite::{SqliteFeatureStore, SqliteStoreConfig};

/// Open the store selected by `config.backend`
pub fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn FeatureStore + Send + Sync>> {
    match config.backend {
        DatabaseBackend::Memory => {
            info!(target: "feature-server", "Using in-memory feature store (not persisted)");
            Ok(Arc::new(InMemoryFeatureStore::new()))
        }
        DatabaseBackend::Sqlite => {
            let store_config = SqliteStoreConfig::new(&config.path)
                .with_pool_size(config.pool_size)
                .with_busy_timeout_ms(config.busy_timeout_ms);
            let store = SqliteFeatureStore::open(store_config).with_context(|| {
                format!("Failed to open feature store at {}", config.path.display())
            })?;
            Ok(Arc::new(store))
        }
    }
}

/// Build the handler state for `config`
pub fn build_state(config: &FeatureConfig) -> Result<ApiState> {
    let store = open_store(&config.database)?;
    let service = Arc::new(FeatureServiceImpl::new(store.clone()));
    Ok(ApiState::new(service, store).with_not_found_policy(config.api.not_found_policy))
}

/// Build the complete HTTP application for `config`
pub fn build_router(config: &FeatureConfig) -> Result<Router> {
    Ok(create_http_server(build_state(config)?))
}
