// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Feature service implementation.

Validates caller input, then delegates to the injected `FeatureStore`.
Holds no mutable state of its own.

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::traits::{FeatureService, FeatureStore};
use crate::types::*;
use crate::validation::{require_key, require_locus, require_rank, require_term};

/// Default implementation of FeatureService
pub struct FeatureServiceImpl {
    store: Arc<dyn FeatureStore>,
}

impl FeatureServiceImpl {
    pub fn new(store: Arc<dyn FeatureStore>) -> Self {
        Self { store }
    }

    /// Log rejected input before handing it back to the caller.
    fn rejected<T>(operation: &str, result: ServiceResult<T>) -> ServiceResult<T> {
        if let Err(ServiceError::InvalidInput(msg)) = &result {
            debug!(target: "feature-services", "{} rejected: {}", operation, msg);
        }
        result
    }
}

#[async_trait]
impl FeatureService for FeatureServiceImpl {
    async fn get_feature(
        &self,
        locus: &str,
        term: &str,
        rank: i32,
        accession: i64,
    ) -> ServiceResult<Option<Feature>> {
        trace!(
            target: "feature-services",
            "getFeature locus {} term {} rank {} accession {}",
            locus, term, rank, accession
        );
        Self::rejected("getFeature", require_key(locus, term, rank, accession))?;

        let found = self.store.find_by_key(locus, term, rank, accession).await?;
        if found.is_none() {
            debug!(
                target: "feature-services",
                "no feature for locus {} term {} rank {} accession {}",
                locus, term, rank, accession
            );
        }
        Ok(found)
    }

    async fn create_feature(
        &self,
        locus: &str,
        term: &str,
        rank: i32,
        sequence: Option<&str>,
    ) -> ServiceResult<Feature> {
        trace!(
            target: "feature-services",
            "createFeature locus {} term {} rank {} sequence {:?}",
            locus, term, rank, sequence
        );
        Self::rejected("createFeature", require_locus(locus))?;
        Self::rejected("createFeature", require_term(term))?;
        Self::rejected("createFeature", require_rank(rank))?;

        let created = self
            .store
            .insert(NewFeature {
                locus: locus.to_string(),
                term: term.to_string(),
                rank,
                sequence: sequence.map(str::to_string),
            })
            .await?;

        debug!(
            target: "feature-services",
            "created feature {} at {} ({} rank {})",
            created.accession, created.locus, created.term, created.rank
        );
        Ok(created)
    }

    async fn list_features_by_locus(&self, locus: &str) -> ServiceResult<Vec<Feature>> {
        trace!(target: "feature-services", "listFeatures locus {}", locus);
        Self::rejected("listFeatures", require_locus(locus))?;

        Ok(self.store.find_by_locus(locus).await?)
    }

    async fn list_features_by_term(&self, locus: &str, term: &str) -> ServiceResult<Vec<Feature>> {
        trace!(target: "feature-services", "listFeatures locus {} term {}", locus, term);
        Self::rejected("listFeatures", require_locus(locus))?;
        Self::rejected("listFeatures", require_term(term))?;

        Ok(self.store.find_by_locus_and_term(locus, term).await?)
    }

    async fn list_features_by_rank(
        &self,
        locus: &str,
        term: &str,
        rank: i32,
    ) -> ServiceResult<Vec<Feature>> {
        trace!(
            target: "feature-services",
            "listFeatures locus {} term {} rank {}",
            locus, term, rank
        );
        Self::rejected("listFeatures", require_locus(locus))?;
        Self::rejected("listFeatures", require_term(term))?;
        Self::rejected("listFeatures", require_rank(rank))?;

        Ok(self.store.find_by_locus_term_rank(locus, term, rank).await?)
    }
}
