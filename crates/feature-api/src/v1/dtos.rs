// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

// Wire shapes for the feature endpoints

use feature_services::Feature;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Body of `POST /features`
///
/// Every field is optional on the wire; missing ones are reported by the
/// service with the matching validation message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FeatureRequest {
    #[schema(example = "HLA-A")]
    pub locus: Option<String>,

    #[schema(example = "SO:0001217")]
    pub term: Option<String>,

    /// Ordinal position among features sharing locus and term (at least 1)
    #[schema(example = 1)]
    pub rank: Option<i32>,

    #[schema(example = "ACGT")]
    pub sequence: Option<String>,
}

/// A stored feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FeatureResponse {
    pub locus: String,
    pub term: String,
    pub rank: i32,
    /// Store-assigned identifier
    pub accession: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<String>,
}

impl From<Feature> for FeatureResponse {
    fn from(feature: Feature) -> Self {
        Self {
            locus: feature.locus,
            term: feature.term,
            rank: feature.rank,
            accession: feature.accession,
            sequence: feature.sequence,
        }
    }
}

/// Query string of `GET /features`
///
/// Numbers are kept as text so that a malformed value reaches validation
/// instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FeatureQuery {
    /// Locus identifier or URI
    pub locus: Option<String>,
    /// Ontology term name, accession or URI
    pub term: Option<String>,
    /// Rank, at least 1
    pub rank: Option<String>,
    /// Accession, at least 1
    pub accession: Option<String>,
}

/// Health check response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,

    /// Store answered a ping
    pub database: bool,
}
