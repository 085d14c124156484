// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
# Feature Service Layer

The stable application boundary for the feature service - defines the
transport-agnostic service and store interfaces used by the HTTP adapter.

## Architecture

```text
┌─────────────────────────────────────────────────────────────────┐
│                    TRANSPORT ADAPTERS                            │
│  Axum/REST (feature-api)                                        │
└────────────────────────────┬────────────────────────────────────┘
                             ↓
┌─────────────────────────────────────────────────────────────────┐
│              SERVICE LAYER (This Crate)                          │
│  • FeatureService  - validation + store orchestration           │
│  • FeatureStore    - persistence contract                       │
└────────────────────────────┬────────────────────────────────────┘
                             ↓
┌─────────────────────────────────────────────────────────────────┐
│                   STORE ADAPTERS                                 │
│  feature-store-sqlite, InMemoryFeatureStore                     │
└─────────────────────────────────────────────────────────────────┘
```

## Design Principles

1. **Transport-Agnostic**: Services know nothing about HTTP
2. **Validate First**: every caller-input check runs before the store is touched
3. **Error Translation**: store failures surface as `ServiceError::Store`, never as `InvalidInput`
4. **Explicit Wiring**: the service receives its store at construction

## Usage

```rust
use std::sync::Arc;
use feature_services::{FeatureService, FeatureServiceImpl, InMemoryFeatureStore};

# async fn demo() -> feature_services::ServiceResult<()> {
let service = FeatureServiceImpl::new(Arc::new(InMemoryFeatureStore::new()));
let created = service.create_feature("HLA-A", "SO:0001217", 1, Some("ACGT")).await?;
let found = service
    .get_feature("HLA-A", "SO:0001217", 1, created.accession)
    .await?;
assert_eq!(found, Some(created));
# Ok(())
# }
```

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

pub mod impls;
pub mod traits;
pub mod types;
pub mod validation;

// Re-export main API
pub use traits::{FeatureService, FeatureStore};

pub use types::{
    // DTOs
    Feature, NewFeature,
    // Errors
    ServiceError, ServiceResult, StoreError, StoreResult,
};

pub use impls::{FeatureServiceImpl, InMemoryFeatureStore};
