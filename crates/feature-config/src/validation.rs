// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Every problem is collected before reporting, so a single run shows all of
//! them.

use crate::{ConfigError, ConfigResult, DatabaseBackend, FeatureConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Lowest port the server may bind
const MIN_PORT: u16 = 1024;

/// One rejected setting, keyed by its dotted TOML path
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("{key} = {port}: ports below 1024 are reserved")]
    ReservedPort { key: &'static str, port: u16 },

    #[error("{key} must not be empty")]
    Empty { key: &'static str },

    #[error("{key}: {reason}")]
    OutOfRange { key: &'static str, reason: String },
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::Invalid` listing every problem found
pub fn validate_config(config: &FeatureConfig) -> ConfigResult<()> {
    let errors = collect_errors(config);
    if errors.is_empty() {
        return Ok(());
    }

    let mut report = String::from("invalid configuration:");
    for error in &errors {
        report.push_str("\n  - ");
        report.push_str(&error.to_string());
    }
    Err(ConfigError::Invalid(report))
}

fn collect_errors(config: &FeatureConfig) -> Vec<ConfigValidationError> {
    use ConfigValidationError::*;

    let api = &config.api;
    let db = &config.database;
    let level = config.logging.level.to_ascii_lowercase();

    let checks = [
        (api.port < MIN_PORT).then_some(ReservedPort {
            key: "api.port",
            port: api.port,
        }),
        api.host.is_empty().then_some(Empty { key: "api.host" }),
        (db.pool_size == 0).then(|| OutOfRange {
            key: "database.pool_size",
            reason: "at least one connection is required".to_string(),
        }),
        (db.busy_timeout_ms == 0).then(|| OutOfRange {
            key: "database.busy_timeout_ms",
            reason: "a zero timeout fails every contended write".to_string(),
        }),
        (db.backend == DatabaseBackend::Sqlite && db.path.as_os_str().is_empty())
            .then_some(Empty {
                key: "database.path",
            }),
        (!LOG_LEVELS.contains(&level.as_str())).then(|| OutOfRange {
            key: "logging.level",
            reason: format!(
                "'{}' is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        }),
    ];

    checks.into_iter().flatten().collect()
}
