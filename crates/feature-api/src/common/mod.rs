// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

// Common types used across endpoints

pub mod error;
pub mod extract;
pub mod params;

pub use error::{ApiError, ApiErrorCode};
pub use extract::{ApiPath, ApiQuery};
pub use params::{int_param, text_param};

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
