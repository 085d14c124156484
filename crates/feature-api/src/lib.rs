// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

// Feature REST API Layer
//
// Maps HTTP requests onto the feature service: parameter coercion,
// status-code mapping, the OpenAPI document, and the health check.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod common;
pub mod endpoints;
pub mod openapi;
pub mod transports;
pub mod v1;

// Re-export commonly used types
pub use common::{ApiError, ApiErrorCode, ApiResult};
pub use feature_config::NotFoundPolicy;
pub use transports::http::{create_http_server, ApiState};
