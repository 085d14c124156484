/*!
Feature service trait.

Defines the stable interface for feature lookup and creation, independent of transport.

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

use crate::types::*;
use async_trait::async_trait;

/// Feature lookup and creation service (transport-agnostic)
///
/// All caller-input checks run before any store call and are applied in the
/// order locus, term, rank, accession.
#[async_trait]
pub trait FeatureService: Send + Sync {
    /// Get a feature by its full key
    ///
    /// # Returns
    /// * `Some(Feature)` - the matching feature
    /// * `None` - no row matches (not an error)
    ///
    /// # Errors
    /// * `ServiceError::InvalidInput` - empty locus/term, rank < 1 or accession < 1
    /// * `ServiceError::Store` - the store failed
    ///
    async fn get_feature(
        &self,
        locus: &str,
        term: &str,
        rank: i32,
        accession: i64,
    ) -> ServiceResult<Option<Feature>>;

    /// Create a feature; the store assigns the accession
    ///
    /// # Returns
    /// * `Feature` - the created feature including its accession
    ///
    /// # Errors
    /// * `ServiceError::InvalidInput` - empty locus/term or rank < 1
    /// * `ServiceError::Store` - the store failed
    ///
    async fn create_feature(
        &self,
        locus: &str,
        term: &str,
        rank: i32,
        sequence: Option<&str>,
    ) -> ServiceResult<Feature>;

    /// List all features at a locus
    ///
    /// # Errors
    /// * `ServiceError::InvalidInput` - empty locus
    ///
    async fn list_features_by_locus(&self, locus: &str) -> ServiceResult<Vec<Feature>>;

    /// List features at a locus matching a term
    ///
    /// # Errors
    /// * `ServiceError::InvalidInput` - empty locus, then empty term
    ///
    async fn list_features_by_term(&self, locus: &str, term: &str) -> ServiceResult<Vec<Feature>>;

    /// List features at a locus matching a term and rank
    ///
    /// Normally zero or one result; rank is not unique in the store.
    ///
    /// # Errors
    /// * `ServiceError::InvalidInput` - checked in order locus, term, rank
    ///
    async fn list_features_by_rank(
        &self,
        locus: &str,
        term: &str,
        rank: i32,
    ) -> ServiceResult<Vec<Feature>>;
}
