// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Contract tests for the feature HTTP API
//!
//! Drive the router in-process with `tower::ServiceExt::oneshot` against the
//! in-memory store, checking status codes and JSON bodies.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use feature_api::{create_http_server, ApiState, NotFoundPolicy};
use feature_services::{FeatureServiceImpl, InMemoryFeatureStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const LOCUS_REQUIRED: &str = "locus must be provided";
const TERM_REQUIRED: &str = "term must be provided";
const RANK_REQUIRED: &str = "rank must be provided and at least 1";
const ACCESSION_REQUIRED: &str = "accession must be provided and at least 1";
const BODY_REQUIRED: &str = "a request body must be provided";

fn build_app(policy: NotFoundPolicy) -> (Router, Arc<InMemoryFeatureStore>) {
    let store = Arc::new(InMemoryFeatureStore::new());
    let service = Arc::new(FeatureServiceImpl::new(store.clone()));
    let state = ApiState::new(service, store.clone()).with_not_found_policy(policy);
    (create_http_server(state), store)
}

/// Send a request; returns the status and the raw body bytes
async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn request_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = body.map(|b| b.to_string());
    let (status, bytes) = send(app, method, uri, body.as_deref()).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, locus: &str, term: &str, rank: i32, sequence: Option<&str>) -> Value {
    let mut body = json!({"locus": locus, "term": term, "rank": rank});
    if let Some(sequence) = sequence {
        body["sequence"] = json!(sequence);
    }
    let (status, created) = request_json(app, "POST", "/features", Some(body)).await;
    assert_eq!(status, StatusCode::OK, "create failed: {}", created);
    created
}

fn assert_invalid(status: StatusCode, body: &Value, detail: &str) {
    assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
    assert_eq!(body["detail"], detail);
    assert_eq!(body["code"], "INVALID_INPUT");
}

// ============================================================================
// POST /features
// ============================================================================

#[tokio::test]
async fn test_create_returns_feature_with_accession() {
    let (app, store) = build_app(NotFoundPolicy::EmptyBody);

    let created = create(&app, "HLA-A", "SO:0001217", 1, Some("ACGT")).await;

    assert_eq!(
        created,
        json!({
            "locus": "HLA-A",
            "term": "SO:0001217",
            "rank": 1,
            "accession": 1,
            "sequence": "ACGT"
        })
    );
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_create_without_sequence_omits_it() {
    let (app, _) = build_app(NotFoundPolicy::EmptyBody);
    let created = create(&app, "HLA-B", "exon", 2, None).await;
    assert!(created.get("sequence").is_none());
    assert_eq!(created["accession"], 1);
}

#[tokio::test]
async fn test_create_missing_body() {
    let (app, store) = build_app(NotFoundPolicy::EmptyBody);

    let (status, bytes) = send(&app, "POST", "/features", None).await;
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_invalid(status, &body, BODY_REQUIRED);

    let (status, body) = request_json(&app, "POST", "/features", Some(Value::Null)).await;
    assert_invalid(status, &body, BODY_REQUIRED);

    assert!(store.is_empty());
}

#[tokio::test]
async fn test_create_malformed_json() {
    let (app, _) = build_app(NotFoundPolicy::EmptyBody);
    let (status, bytes) = send(&app, "POST", "/features", Some("{\"locus\": ")).await;
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(body["detail"].as_str().unwrap().starts_with("invalid request body"));
}

#[tokio::test]
async fn test_create_validation_messages_in_order() {
    let (app, store) = build_app(NotFoundPolicy::EmptyBody);

    let cases = [
        (json!({}), LOCUS_REQUIRED),
        (json!({"locus": "", "term": "", "rank": 0}), LOCUS_REQUIRED),
        (json!({"locus": "HLA-A"}), TERM_REQUIRED),
        (json!({"locus": "HLA-A", "term": "", "rank": 0}), TERM_REQUIRED),
        (json!({"locus": "HLA-A", "term": "exon"}), RANK_REQUIRED),
        (json!({"locus": "HLA-A", "term": "exon", "rank": 0}), RANK_REQUIRED),
        (json!({"locus": "HLA-A", "term": "exon", "rank": -4}), RANK_REQUIRED),
    ];
    for (body, detail) in cases {
        let (status, response) = request_json(&app, "POST", "/features", Some(body)).await;
        assert_invalid(status, &response, detail);
    }
    assert!(store.is_empty());
}

// ============================================================================
// GET /features?locus=&term=&rank=&accession=
// ============================================================================

#[tokio::test]
async fn test_get_feature_round_trip() {
    let (app, _) = build_app(NotFoundPolicy::EmptyBody);
    let created = create(&app, "HLA-A", "SO:0001217", 1, Some("ACGT")).await;

    let uri = format!(
        "/features?locus=HLA-A&term=SO:0001217&rank=1&accession={}",
        created["accession"]
    );
    let (status, found) = request_json(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, created);

    // Unchanged store, identical answer
    let (_, again) = request_json(&app, "GET", &uri, None).await;
    assert_eq!(again, found);
}

#[tokio::test]
async fn test_get_feature_miss_returns_empty_body() {
    let (app, _) = build_app(NotFoundPolicy::EmptyBody);
    create(&app, "HLA-A", "exon", 1, None).await;

    let (status, bytes) = send(
        &app,
        "GET",
        "/features?locus=HLA-A&term=exon&rank=1&accession=99",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn test_get_feature_miss_explicit_404() {
    let (app, _) = build_app(NotFoundPolicy::Explicit404);

    let (status, body) = request_json(
        &app,
        "GET",
        "/features?locus=HLA-A&term=exon&rank=1&accession=99",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "feature not found", "code": "NOT_FOUND"}));
}

#[tokio::test]
async fn test_get_feature_validation_messages() {
    let (app, _) = build_app(NotFoundPolicy::EmptyBody);

    let cases = [
        ("/features", LOCUS_REQUIRED),
        ("/features?locus=&term=exon&rank=1&accession=1", LOCUS_REQUIRED),
        ("/features?rank=0&accession=0", LOCUS_REQUIRED),
        ("/features?locus=HLA-A&rank=0", TERM_REQUIRED),
        ("/features?locus=HLA-A&term=exon", RANK_REQUIRED),
        ("/features?locus=HLA-A&term=exon&rank=0&accession=0", RANK_REQUIRED),
        ("/features?locus=HLA-A&term=exon&rank=first&accession=1", RANK_REQUIRED),
        ("/features?locus=HLA-A&term=exon&rank=1", ACCESSION_REQUIRED),
        ("/features?locus=HLA-A&term=exon&rank=1&accession=-3", ACCESSION_REQUIRED),
    ];
    for (uri, detail) in cases {
        let (status, body) = request_json(&app, "GET", uri, None).await;
        assert_invalid(status, &body, detail);
    }
}

// ============================================================================
// GET /features/{locus}[/{term}[/{rank}[/{accession}]]]
// ============================================================================

#[tokio::test]
async fn test_list_routes_filter_and_order() {
    let (app, _) = build_app(NotFoundPolicy::EmptyBody);
    create(&app, "HLA-A", "intron", 1, None).await;
    create(&app, "HLA-A", "exon", 2, None).await;
    create(&app, "HLA-B", "exon", 1, None).await;
    create(&app, "HLA-A", "exon", 1, Some("GG")).await;

    let (status, at_locus) = request_json(&app, "GET", "/features/HLA-A", None).await;
    assert_eq!(status, StatusCode::OK);
    let keys: Vec<(String, i64, i64)> = at_locus
        .as_array()
        .unwrap()
        .iter()
        .map(|f| {
            (
                f["term"].as_str().unwrap().to_string(),
                f["rank"].as_i64().unwrap(),
                f["accession"].as_i64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        keys,
        vec![
            ("exon".to_string(), 1, 4),
            ("exon".to_string(), 2, 2),
            ("intron".to_string(), 1, 1),
        ]
    );

    let (_, exons) = request_json(&app, "GET", "/features/HLA-A/exon", None).await;
    assert_eq!(exons.as_array().unwrap().len(), 2);

    let (_, rank_one) = request_json(&app, "GET", "/features/HLA-A/exon/1", None).await;
    assert_eq!(
        rank_one,
        json!([{"locus": "HLA-A", "term": "exon", "rank": 1, "accession": 4, "sequence": "GG"}])
    );
}

#[tokio::test]
async fn test_list_routes_return_empty_arrays() {
    let (app, _) = build_app(NotFoundPolicy::Explicit404);
    for uri in ["/features/HLA-C", "/features/HLA-C/exon", "/features/HLA-C/exon/1"] {
        let (status, body) = request_json(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }
}

#[tokio::test]
async fn test_list_by_rank_validation() {
    let (app, _) = build_app(NotFoundPolicy::EmptyBody);
    for uri in ["/features/HLA-A/exon/0", "/features/HLA-A/exon/-1", "/features/HLA-A/exon/x"] {
        let (status, body) = request_json(&app, "GET", uri, None).await;
        assert_invalid(status, &body, RANK_REQUIRED);
    }
}

#[tokio::test]
async fn test_get_by_path() {
    let (app, _) = build_app(NotFoundPolicy::EmptyBody);
    let created = create(&app, "HLA-DRB1", "SO:0000147", 3, Some("TTAG")).await;

    let (status, found) = request_json(&app, "GET", "/features/HLA-DRB1/SO:0000147/3/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, created);

    let (status, bytes) = send(&app, "GET", "/features/HLA-DRB1/SO:0000147/3/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(bytes.is_empty());

    let (status, body) = request_json(&app, "GET", "/features/HLA-DRB1/SO:0000147/0/0", None).await;
    assert_invalid(status, &body, RANK_REQUIRED);

    let (status, body) = request_json(&app, "GET", "/features/HLA-DRB1/SO:0000147/3/0", None).await;
    assert_invalid(status, &body, ACCESSION_REQUIRED);
}

#[tokio::test]
async fn test_get_by_path_explicit_404() {
    let (app, _) = build_app(NotFoundPolicy::Explicit404);
    let (status, body) = request_json(&app, "GET", "/features/HLA-A/exon/1/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

// ============================================================================
// Store failures, health, docs, fallback
// ============================================================================

#[tokio::test]
async fn test_store_failure_is_500() {
    let (app, store) = build_app(NotFoundPolicy::EmptyBody);
    store.set_unavailable(true);

    let (status, body) = request_json(&app, "GET", "/features/HLA-A", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "INTERNAL");

    let (status, body) = request_json(
        &app,
        "POST",
        "/features",
        Some(json!({"locus": "HLA-A", "term": "exon", "rank": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "INTERNAL");

    // Validation still runs first
    let (status, body) = request_json(&app, "GET", "/features/HLA-A/exon/0", None).await;
    assert_invalid(status, &body, RANK_REQUIRED);
}

#[tokio::test]
async fn test_health() {
    let (app, store) = build_app(NotFoundPolicy::EmptyBody);

    let (status, body) = request_json(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy", "database": true}));

    store.set_unavailable(true);
    let (status, body) = request_json(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({"status": "unhealthy", "database": false}));
}

#[tokio::test]
async fn test_openapi_document_served() {
    let (app, _) = build_app(NotFoundPolicy::EmptyBody);
    let (status, doc) = request_json(&app, "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["info"]["title"], "Feature service");
    assert!(doc["paths"]["/features/{locus}/{term}"].is_object());
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (app, _) = build_app(NotFoundPolicy::EmptyBody);
    let (status, body) = request_json(&app, "GET", "/genes", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

// ============================================================================
// Extraction failures keep the error body shape
// ============================================================================

#[tokio::test]
async fn test_repeated_query_key_is_json_400() {
    let (app, _) = build_app(NotFoundPolicy::EmptyBody);
    let (status, body) = request_json(
        &app,
        "GET",
        "/features?locus=A&locus=B&term=x&rank=1&accession=1",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(body["detail"].as_str().unwrap().contains("locus"), "body: {}", body);
}

#[tokio::test]
async fn test_invalid_utf8_path_segment_is_json_400() {
    let (app, _) = build_app(NotFoundPolicy::EmptyBody);
    for uri in ["/features/%FF", "/features/HLA-A/%FF/1", "/features/HLA-A/exon/1/%C3"] {
        let (status, body) = request_json(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["code"], "INVALID_INPUT", "{}", uri);
        assert!(body["detail"].is_string());
    }
}
