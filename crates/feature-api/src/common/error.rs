// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

/// API error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiErrorCode {
    NotFound,
    InvalidInput,
    Internal,
}

impl ApiErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiErrorCode::NotFound => StatusCode::NOT_FOUND,
            ApiErrorCode::InvalidInput => StatusCode::BAD_REQUEST,
            ApiErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error body: `{"detail": "...", "code": "..."}`
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Human-readable message
    pub detail: String,

    /// Error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ApiErrorCode>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.detail)
    }
}

impl ApiError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: ApiErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(detail).with_code(ApiErrorCode::NotFound)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(message).with_code(ApiErrorCode::InvalidInput)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(message).with_code(ApiErrorCode::Internal)
    }

    /// Status code this error is answered with; 500 when no code is set
    pub fn status(&self) -> StatusCode {
        self.code
            .map(|code| code.status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Convert service layer errors to API errors
impl From<feature_services::ServiceError> for ApiError {
    fn from(err: feature_services::ServiceError) -> Self {
        use feature_services::ServiceError;

        match err {
            ServiceError::InvalidInput(msg) => ApiError::invalid_input(msg),
            store @ ServiceError::Store(_) => ApiError::internal(store.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(target: "feature-api", "{} {}", status.as_u16(), self.detail);
        } else {
            tracing::debug!(target: "feature-api", "{} {}", status.as_u16(), self.detail);
        }
        (status, Json(self)).into_response()
    }
}
