// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Caller-input preconditions
//!
//! Each check reports a fixed message naming its field. Operations call them
//! in declaration order (locus, term, rank, accession) so that the first
//! invalid field is the one reported.

use crate::types::{ServiceError, ServiceResult};

pub const LOCUS_REQUIRED: &str = "locus must be provided";
pub const TERM_REQUIRED: &str = "term must be provided";
pub const RANK_REQUIRED: &str = "rank must be provided and at least 1";
pub const ACCESSION_REQUIRED: &str = "accession must be provided and at least 1";
pub const BODY_REQUIRED: &str = "a request body must be provided";

pub fn require_locus(locus: &str) -> ServiceResult<()> {
    if locus.is_empty() {
        return Err(ServiceError::invalid_input(LOCUS_REQUIRED));
    }
    Ok(())
}

pub fn require_term(term: &str) -> ServiceResult<()> {
    if term.is_empty() {
        return Err(ServiceError::invalid_input(TERM_REQUIRED));
    }
    Ok(())
}

pub fn require_rank(rank: i32) -> ServiceResult<()> {
    if rank < 1 {
        return Err(ServiceError::invalid_input(RANK_REQUIRED));
    }
    Ok(())
}

pub fn require_accession(accession: i64) -> ServiceResult<()> {
    if accession < 1 {
        return Err(ServiceError::invalid_input(ACCESSION_REQUIRED));
    }
    Ok(())
}

/// Full key check used by lookups.
pub fn require_key(locus: &str, term: &str, rank: i32, accession: i64) -> ServiceResult<()> {
    require_locus(locus)?;
    require_term(term)?;
    require_rank(rank)?;
    require_accession(accession)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: ServiceResult<()>) -> String {
        match result {
            Err(ServiceError::InvalidInput(msg)) => msg,
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_key_passes() {
        assert!(require_key("HLA-A", "SO:0001217", 1, 1).is_ok());
    }

    #[test]
    fn test_first_invalid_field_wins() {
        assert_eq!(message(require_key("", "", 0, 0)), LOCUS_REQUIRED);
        assert_eq!(message(require_key("HLA-A", "", 0, 0)), TERM_REQUIRED);
        assert_eq!(message(require_key("HLA-A", "exon", 0, 0)), RANK_REQUIRED);
        assert_eq!(message(require_key("HLA-A", "exon", 1, 0)), ACCESSION_REQUIRED);
    }

    #[test]
    fn test_negative_values_rejected() {
        assert_eq!(message(require_rank(-4)), RANK_REQUIRED);
        assert_eq!(message(require_accession(i64::MIN)), ACCESSION_REQUIRED);
    }

    #[test]
    fn test_whitespace_is_not_empty() {
        assert!(require_locus(" ").is_ok());
        assert!(require_term("\t").is_ok());
    }
}
