// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Transport-agnostic Data Transfer Objects (DTOs).

These types define the stable contract between adapters, services and stores.

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// ============================================================================
// FEATURE DTOs
// ============================================================================

/// An enumerated sequence feature attached to a locus.
///
/// Built fresh for every request, either from validated input or from a
/// store row. Nothing hands out `&mut Feature` across requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Feature {
    /// Locus name or URI
    pub locus: String,
    /// Sequence Ontology (SO) term name, accession, or URI
    pub term: String,
    /// Ordinal position among features sharing locus and term, at least 1
    pub rank: i32,
    /// Store-assigned identifier, at least 1
    pub accession: i64,
    /// Sequence letters; may be absent depending on the store projection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<String>,
}

impl Feature {
    /// Listing order shared by every store: term, then rank, then accession.
    pub fn listing_order(&self, other: &Self) -> Ordering {
        self.term
            .cmp(&other.term)
            .then(self.rank.cmp(&other.rank))
            .then(self.accession.cmp(&other.accession))
    }
}

/// Validated creation input handed to a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFeature {
    pub locus: String,
    pub term: String,
    pub rank: i32,
    pub sequence: Option<String>,
}

impl NewFeature {
    /// Attach the accession assigned by the store.
    pub fn into_feature(self, accession: i64) -> Feature {
        Feature {
            locus: self.locus,
            term: self.term,
            rank: self.rank,
            accession,
            sequence: self.sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(term: &str, rank: i32, accession: i64) -> Feature {
        Feature {
            locus: "HLA-A".to_string(),
            term: term.to_string(),
            rank,
            accession,
            sequence: None,
        }
    }

    #[test]
    fn test_listing_order_term_rank_accession() {
        let mut features = vec![
            feature("exon", 2, 5),
            feature("UTR", 1, 9),
            feature("exon", 1, 7),
            feature("exon", 1, 3),
        ];
        features.sort_by(Feature::listing_order);

        let keys: Vec<(&str, i32, i64)> = features
            .iter()
            .map(|f| (f.term.as_str(), f.rank, f.accession))
            .collect();
        assert_eq!(keys, vec![("UTR", 1, 9), ("exon", 1, 3), ("exon", 1, 7), ("exon", 2, 5)]);
    }

    #[test]
    fn test_sequence_omitted_when_absent() {
        let json = serde_json::to_value(feature("exon", 1, 1)).unwrap();
        assert!(json.get("sequence").is_none());
        assert_eq!(json["accession"], 1);
    }

    #[test]
    fn test_new_feature_into_feature() {
        let new = NewFeature {
            locus: "HLA-B".to_string(),
            term: "SO:0000147".to_string(),
            rank: 3,
            sequence: Some("ACGT".to_string()),
        };
        let created = new.into_feature(42);
        assert_eq!(created.accession, 42);
        assert_eq!(created.sequence.as_deref(), Some("ACGT"));
    }
}
