// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

// Health check endpoint

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::transports::http::server::ApiState;
use crate::v1::HealthResponse;

/// Health check
///
/// Pings the feature store. Answers 503 when the store cannot be reached.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service and store are up", body = HealthResponse),
        (status = 503, description = "Store unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<ApiState>) -> (StatusCode, Json<HealthResponse>) {
    match state.feature_store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                database: true,
            }),
        ),
        Err(e) => {
            tracing::warn!(target: "feature-api", "Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy".to_string(),
                    database: false,
                }),
            )
        }
    }
}
