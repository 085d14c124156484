// Copyright 2025 Neuraville Inc.
// Licensed under the Apache License, Version 2.0

//! Feature persistence contract
//!
//! Implemented by the relational adapter (`feature-store-sqlite`) and by
//! [`InMemoryFeatureStore`](crate::impls::InMemoryFeatureStore). Stores do no
//! input validation; the service has already done it.

use async_trait::async_trait;

use crate::types::*;

/// Persistence interface the feature service depends on.
///
/// Every returned sequence is in [`Feature::listing_order`] so that listings
/// are stable for a given data set. `insert` is atomic per call.
#[async_trait]
pub trait FeatureStore: Send + Sync {
    /// Exact match on the four-part key
    async fn find_by_key(
        &self,
        locus: &str,
        term: &str,
        rank: i32,
        accession: i64,
    ) -> StoreResult<Option<Feature>>;

    /// Insert a row and return it with its generated accession
    async fn insert(&self, feature: NewFeature) -> StoreResult<Feature>;

    /// All features at a locus
    async fn find_by_locus(&self, locus: &str) -> StoreResult<Vec<Feature>>;

    /// Features at a locus matching a term
    async fn find_by_locus_and_term(&self, locus: &str, term: &str) -> StoreResult<Vec<Feature>>;

    /// Features at a locus matching a term and rank
    async fn find_by_locus_term_rank(
        &self,
        locus: &str,
        term: &str,
        rank: i32,
    ) -> StoreResult<Vec<Feature>>;

    /// Cheap round trip used by health checks
    async fn ping(&self) -> StoreResult<()>;
}
