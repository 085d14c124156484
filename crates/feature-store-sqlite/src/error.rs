// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! SQLite store errors and their mapping onto the store contract

use feature_services::StoreError;
use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// Configuration rejected before opening
    #[error("invalid store configuration: {0}")]
    Invalid(String),

    /// Database error
    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),

    /// Stored schema does not match this build
    #[error("schema version mismatch: found {found}, expected {expected}")]
    SchemaMismatch { found: i64, expected: i64 },

    /// Blocking task failed to complete
    #[error("blocking task failed: {0}")]
    Join(String),
}

impl From<SqliteStoreError> for StoreError {
    fn from(err: SqliteStoreError) -> Self {
        match err {
            SqliteStoreError::Db(db) => classify(db),
            SqliteStoreError::Join(msg) => StoreError::Unavailable(msg),
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

/// Busy, locked and unopenable databases are connectivity problems; the rest are query failures.
fn classify(err: rusqlite::Error) -> StoreError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _) => match failure.code {
            ErrorCode::DatabaseBusy
            | ErrorCode::DatabaseLocked
            | ErrorCode::CannotOpen
            | ErrorCode::NotADatabase
            | ErrorCode::SystemIoFailure => StoreError::Unavailable(err.to_string()),
            _ => StoreError::Query(err.to_string()),
        },
        rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::InvalidColumnType(..)
        | rusqlite::Error::IntegralValueOutOfRange(..) => StoreError::Corrupt(err.to_string()),
        _ => StoreError::Query(err.to_string()),
    }
}
