// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
In-memory feature store.

Test double for the service layer and a zero-setup backend for local runs.
Rows live in a `BTreeMap` keyed by accession; accessions start at 1.

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::trace;

use crate::traits::FeatureStore;
use crate::types::{Feature, NewFeature, StoreError, StoreResult};

#[derive(Default)]
struct Rows {
    next_accession: i64,
    by_accession: BTreeMap<i64, Feature>,
}

/// `FeatureStore` kept entirely in process memory
#[derive(Default)]
pub struct InMemoryFeatureStore {
    rows: RwLock<Rows>,
    unavailable: AtomicBool,
}

impl InMemoryFeatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `StoreError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.rows.read().by_accession.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store marked unavailable".to_string()));
        }
        Ok(())
    }

    fn select<F>(&self, predicate: F) -> StoreResult<Vec<Feature>>
    where
        F: Fn(&Feature) -> bool,
    {
        self.check_available()?;
        let rows = self.rows.read();
        let mut selected: Vec<Feature> = rows
            .by_accession
            .values()
            .filter(|f| predicate(f))
            .cloned()
            .collect();
        selected.sort_by(Feature::listing_order);
        Ok(selected)
    }
}

#[async_trait]
impl FeatureStore for InMemoryFeatureStore {
    async fn find_by_key(
        &self,
        locus: &str,
        term: &str,
        rank: i32,
        accession: i64,
    ) -> StoreResult<Option<Feature>> {
        self.check_available()?;
        let rows = self.rows.read();
        Ok(rows
            .by_accession
            .get(&accession)
            .filter(|f| f.locus == locus && f.term == term && f.rank == rank)
            .cloned())
    }

    async fn insert(&self, feature: NewFeature) -> StoreResult<Feature> {
        self.check_available()?;
        let mut rows = self.rows.write();
        rows.next_accession += 1;
        let created = feature.into_feature(rows.next_accession);
        rows.by_accession.insert(created.accession, created.clone());
        trace!(target: "feature-services", "in-memory insert accession {}", created.accession);
        Ok(created)
    }

    async fn find_by_locus(&self, locus: &str) -> StoreResult<Vec<Feature>> {
        self.select(|f| f.locus == locus)
    }

    async fn find_by_locus_and_term(&self, locus: &str, term: &str) -> StoreResult<Vec<Feature>> {
        self.select(|f| f.locus == locus && f.term == term)
    }

    async fn find_by_locus_term_rank(
        &self,
        locus: &str,
        term: &str,
        rank: i32,
    ) -> StoreResult<Vec<Feature>> {
        self.select(|f| f.locus == locus && f.term == term && f.rank == rank)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.check_available()
    }
}
