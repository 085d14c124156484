/*!
Service trait definitions.

These traits define the stable application boundary between
transport adapters, the feature service and its store.

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

pub mod feature_service;
pub mod feature_store;

// Re-export for convenience
pub use feature_service::FeatureService;
pub use feature_store::FeatureStore;
