// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

// OpenAPI documentation generation
//
// Generated at compile time with utoipa from the endpoint annotations.

use utoipa::OpenApi;

use crate::common::{ApiError, ApiErrorCode};
use crate::v1::{FeatureRequest, FeatureResponse, HealthResponse};

/// OpenAPI documentation for the feature service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Feature service",
        version = "1.0.0",
        description = "Enumerated sequence feature service.",
        license(
            name = "LGPL-3.0-or-later",
            url = "https://www.gnu.org/licenses/lgpl-3.0.html"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        crate::endpoints::features::get_feature,
        crate::endpoints::features::create_feature,
        crate::endpoints::features::list_features_by_locus,
        crate::endpoints::features::list_features_by_term,
        crate::endpoints::features::list_features_by_rank,
        crate::endpoints::features::get_feature_by_path,
        crate::endpoints::health::health_check,
    ),
    components(
        schemas(
            FeatureRequest,
            FeatureResponse,
            HealthResponse,
            ApiError,
            ApiErrorCode,
        )
    ),
    tags(
        (name = "Features", description = "Feature lookup, listing and creation"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// The OpenAPI document as pretty-printed JSON
pub fn get_openapi_json() -> String {
    ApiDoc::openapi()
        .to_pretty_json()
        .unwrap_or_else(|_| "{}".to_string())
}
