// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

// HTTP server implementation (Axum)
//
// Sets up routing, middleware, and the state shared by all handlers.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, Uri},
    middleware::{self, Next},
    response::{Json, Response},
    routing::get,
    Router,
};
use feature_config::NotFoundPolicy;
use feature_services::{FeatureService, FeatureStore};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::common::ApiError;
use crate::endpoints::{features, health};
use crate::openapi::ApiDoc;

/// Response bodies at or above this size are not logged
const MAX_LOGGED_BODY_BYTES: usize = 10_000;

/// Application state shared across all HTTP handlers
#[derive(Clone)]
pub struct ApiState {
    pub feature_service: Arc<dyn FeatureService + Send + Sync>,
    /// Used directly only by the health check
    pub feature_store: Arc<dyn FeatureStore + Send + Sync>,
    pub not_found_policy: NotFoundPolicy,
}

impl ApiState {
    pub fn new(
        feature_service: Arc<dyn FeatureService + Send + Sync>,
        feature_store: Arc<dyn FeatureStore + Send + Sync>,
    ) -> Self {
        Self {
            feature_service,
            feature_store,
            not_found_policy: NotFoundPolicy::default(),
        }
    }

    pub fn with_not_found_policy(mut self, policy: NotFoundPolicy) -> Self {
        self.not_found_policy = policy;
        self
    }
}

/// Create the main HTTP server application
pub fn create_http_server(state: ApiState) -> Router {
    Router::new()
        // OpenAPI document
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route("/health", get(health::health_check))
        .merge(create_feature_router())
        // Catch-all route for unmatched requests
        .fallback(unmatched_route)
        .with_state(state)
        .layer(middleware::from_fn(log_request_response_bodies))
        .layer(create_cors_layer())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::span!(
                        target: "feature-api",
                        tracing::Level::DEBUG,
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<_>, _span: &tracing::Span| {
                    tracing::debug!(target: "feature-api", "Incoming request: {} {}", request.method(), request.uri());
                })
                .on_response(|response: &Response<_>, latency: std::time::Duration, span: &tracing::Span| {
                    tracing::debug!(
                        target: "feature-api",
                        "Response: status={}, latency={:?}",
                        response.status(),
                        latency
                    );
                    span.record("status", response.status().as_u16());
                    span.record("latency_ms", latency.as_millis() as u64);
                })
                .on_failure(|error: tower_http::classify::ServerErrorsFailureClass, latency: std::time::Duration, _span: &tracing::Span| {
                    tracing::error!(target: "feature-api", "Request failed: {}, latency={:?}", error, latency);
                }),
        )
}

/// Feature resource routes
fn create_feature_router() -> Router<ApiState> {
    Router::new()
        .route(
            "/features",
            get(features::get_feature).post(features::create_feature),
        )
        .route("/features/:locus", get(features::list_features_by_locus))
        .route("/features/:locus/:term", get(features::list_features_by_term))
        .route(
            "/features/:locus/:term/:rank",
            get(features::list_features_by_rank),
        )
        .route(
            "/features/:locus/:term/:rank/:accession",
            get(features::get_feature_by_path),
        )
}

async fn unmatched_route(method: Method, uri: Uri) -> ApiError {
    tracing::warn!(target: "feature-api", "Unmatched request: {} {}", method, uri);
    ApiError::not_found(format!("no route for {} {}", method, uri.path()))
}

/// Create CORS layer for HTTP server
fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Middleware to log request and response bodies for debugging
async fn log_request_response_bodies(
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let (parts, body) = request.into_parts();

    // Only log bodies for requests that carry one
    let should_log_request = matches!(parts.method, Method::POST | Method::PUT | Method::PATCH);

    let request = if should_log_request {
        let bytes = body
            .collect()
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
            .to_bytes();
        if let Ok(body_str) = std::str::from_utf8(&bytes) {
            if !body_str.is_empty() {
                tracing::debug!(target: "feature-api", "Request body: {}", body_str);
            }
        }
        Request::from_parts(parts, Body::from(bytes))
    } else {
        Request::from_parts(parts, body)
    };

    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let bytes = body
        .collect()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .to_bytes();
    if bytes.len() < MAX_LOGGED_BODY_BYTES {
        if let Ok(body_str) = std::str::from_utf8(&bytes) {
            if body_str.starts_with('{') || body_str.starts_with('[') {
                tracing::debug!(target: "feature-api", "Response body: {}", body_str);
            }
        }
    }
    Ok(Response::from_parts(parts, Body::from(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_services::{FeatureServiceImpl, InMemoryFeatureStore};

    #[test]
    fn test_state_defaults_to_empty_body_policy() {
        let store = Arc::new(InMemoryFeatureStore::new());
        let service = Arc::new(FeatureServiceImpl::new(store.clone()));
        let state = ApiState::new(service, store);
        assert_eq!(state.not_found_policy, NotFoundPolicy::EmptyBody);

        let state = state.with_not_found_policy(NotFoundPolicy::Explicit404);
        assert_eq!(state.not_found_policy, NotFoundPolicy::Explicit404);
    }
}
