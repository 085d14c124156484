// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

// Feature endpoints
//
// Thin adapters: coerce raw parameters, call the feature service, and map
// its outcome onto a status code and body.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use feature_config::NotFoundPolicy;
use feature_services::validation::BODY_REQUIRED;
use feature_services::Feature;

use crate::common::{int_param, text_param, ApiError, ApiPath, ApiQuery, ApiResult};
use crate::transports::http::server::ApiState;
use crate::v1::{FeatureQuery, FeatureRequest, FeatureResponse};

const NOT_FOUND_DETAIL: &str = "feature not found";

/// A single-feature lookup result under the configured not-found policy
fn lookup_response(found: Option<Feature>, policy: NotFoundPolicy) -> ApiResult<Response> {
    match (found, policy) {
        (Some(feature), _) => Ok(Json(FeatureResponse::from(feature)).into_response()),
        (None, NotFoundPolicy::EmptyBody) => Ok(StatusCode::OK.into_response()),
        (None, NotFoundPolicy::Explicit404) => Err(ApiError::not_found(NOT_FOUND_DETAIL)),
    }
}

fn list_response(features: Vec<Feature>) -> Json<Vec<FeatureResponse>> {
    Json(features.into_iter().map(FeatureResponse::from).collect())
}

/// Parse a creation body. Empty and `null` bodies count as missing.
fn parse_feature_request(body: &[u8]) -> ApiResult<FeatureRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::invalid_input(BODY_REQUIRED));
    }
    match serde_json::from_slice::<Option<FeatureRequest>>(body) {
        Ok(Some(request)) => Ok(request),
        Ok(None) => Err(ApiError::invalid_input(BODY_REQUIRED)),
        Err(e) => Err(ApiError::invalid_input(format!("invalid request body: {}", e))),
    }
}

/// Look up one feature by its full key
///
/// Returns the feature, or an empty 200 body when nothing matches (404 under
/// the `explicit_404` policy).
#[utoipa::path(
    get,
    path = "/features",
    tag = "Features",
    params(FeatureQuery),
    responses(
        (status = 200, description = "Matching feature, or an empty body", body = FeatureResponse),
        (status = 400, description = "locus/term missing, rank < 1 or accession < 1", body = ApiError),
        (status = 404, description = "No match (explicit_404 policy only)", body = ApiError),
        (status = 500, description = "Store failure", body = ApiError)
    )
)]
pub async fn get_feature(
    State(state): State<ApiState>,
    ApiQuery(query): ApiQuery<FeatureQuery>,
) -> ApiResult<Response> {
    let found = state
        .feature_service
        .get_feature(
            text_param(query.locus.as_deref()),
            text_param(query.term.as_deref()),
            int_param(query.rank.as_deref()),
            int_param(query.accession.as_deref()),
        )
        .await?;
    lookup_response(found, state.not_found_policy)
}

/// Create a feature
///
/// The store assigns the accession; the created feature is returned.
#[utoipa::path(
    post,
    path = "/features",
    tag = "Features",
    request_body = FeatureRequest,
    responses(
        (status = 200, description = "Created feature", body = FeatureResponse),
        (status = 400, description = "Missing body, locus/term missing or rank < 1", body = ApiError),
        (status = 500, description = "Store failure", body = ApiError)
    )
)]
pub async fn create_feature(
    State(state): State<ApiState>,
    body: Bytes,
) -> ApiResult<Json<FeatureResponse>> {
    let request = parse_feature_request(&body)?;

    let created = state
        .feature_service
        .create_feature(
            text_param(request.locus.as_deref()),
            text_param(request.term.as_deref()),
            request.rank.unwrap_or_default(),
            request.sequence.as_deref(),
        )
        .await?;
    Ok(Json(FeatureResponse::from(created)))
}

/// List the features at a locus
#[utoipa::path(
    get,
    path = "/features/{locus}",
    tag = "Features",
    params(
        ("locus" = String, Path, description = "Locus identifier or URI")
    ),
    responses(
        (status = 200, description = "Features at the locus (possibly none)", body = [FeatureResponse]),
        (status = 400, description = "locus missing", body = ApiError),
        (status = 500, description = "Store failure", body = ApiError)
    )
)]
pub async fn list_features_by_locus(
    State(state): State<ApiState>,
    ApiPath(locus): ApiPath<String>,
) -> ApiResult<Json<Vec<FeatureResponse>>> {
    let features = state.feature_service.list_features_by_locus(&locus).await?;
    Ok(list_response(features))
}

/// List the features at a locus with a term
#[utoipa::path(
    get,
    path = "/features/{locus}/{term}",
    tag = "Features",
    params(
        ("locus" = String, Path, description = "Locus identifier or URI"),
        ("term" = String, Path, description = "Ontology term")
    ),
    responses(
        (status = 200, description = "Matching features (possibly none)", body = [FeatureResponse]),
        (status = 400, description = "locus or term missing", body = ApiError),
        (status = 500, description = "Store failure", body = ApiError)
    )
)]
pub async fn list_features_by_term(
    State(state): State<ApiState>,
    ApiPath((locus, term)): ApiPath<(String, String)>,
) -> ApiResult<Json<Vec<FeatureResponse>>> {
    let features = state
        .feature_service
        .list_features_by_term(&locus, &term)
        .await?;
    Ok(list_response(features))
}

/// List the features at a locus with a term and rank
#[utoipa::path(
    get,
    path = "/features/{locus}/{term}/{rank}",
    tag = "Features",
    params(
        ("locus" = String, Path, description = "Locus identifier or URI"),
        ("term" = String, Path, description = "Ontology term"),
        ("rank" = String, Path, description = "Rank, at least 1")
    ),
    responses(
        (status = 200, description = "Matching features (possibly none)", body = [FeatureResponse]),
        (status = 400, description = "locus/term missing or rank < 1", body = ApiError),
        (status = 500, description = "Store failure", body = ApiError)
    )
)]
pub async fn list_features_by_rank(
    State(state): State<ApiState>,
    ApiPath((locus, term, rank)): ApiPath<(String, String, String)>,
) -> ApiResult<Json<Vec<FeatureResponse>>> {
    let features = state
        .feature_service
        .list_features_by_rank(&locus, &term, int_param(Some(rank.as_str())))
        .await?;
    Ok(list_response(features))
}

/// Look up one feature by its full key given as path segments
#[utoipa::path(
    get,
    path = "/features/{locus}/{term}/{rank}/{accession}",
    tag = "Features",
    params(
        ("locus" = String, Path, description = "Locus identifier or URI"),
        ("term" = String, Path, description = "Ontology term"),
        ("rank" = String, Path, description = "Rank, at least 1"),
        ("accession" = String, Path, description = "Accession, at least 1")
    ),
    responses(
        (status = 200, description = "Matching feature, or an empty body", body = FeatureResponse),
        (status = 400, description = "Any of the four parameters invalid", body = ApiError),
        (status = 404, description = "No match (explicit_404 policy only)", body = ApiError),
        (status = 500, description = "Store failure", body = ApiError)
    )
)]
pub async fn get_feature_by_path(
    State(state): State<ApiState>,
    ApiPath((locus, term, rank, accession)): ApiPath<(String, String, String, String)>,
) -> ApiResult<Response> {
    let found = state
        .feature_service
        .get_feature(
            &locus,
            &term,
            int_param(Some(rank.as_str())),
            int_param(Some(accession.as_str())),
        )
        .await?;
    lookup_response(found, state.not_found_policy)
}
