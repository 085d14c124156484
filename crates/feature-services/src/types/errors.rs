// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Service layer error types.

Transport-agnostic errors that adapters map to HTTP status codes.
A lookup that finds nothing is not an error: it is `Ok(None)`.

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

use thiserror::Error;

/// Service layer errors (transport-agnostic)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Caller input failed a precondition (400 in HTTP)
    #[error("{0}")]
    InvalidInput(String),

    /// Store or connection failure (500 in HTTP). Never retried here.
    #[error("Store error: {0}")]
    Store(String),
}

impl ServiceError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ServiceError::InvalidInput(message.into())
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors raised by `FeatureStore` implementations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing database could not be reached or a connection was unusable
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A statement failed to execute
    #[error("query failed: {0}")]
    Query(String),

    /// A row could not be mapped to a feature
    #[error("corrupt row: {0}")]
    Corrupt(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

// ============================================================================
// ERROR CONVERSIONS FROM STORE
// ============================================================================

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        ServiceError::Store(err.to_string())
    }
}
