/*!
Service implementations.

Default implementation of the feature service plus an in-memory store.

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

pub mod feature_service_impl;
pub mod memory_store;

// Re-export for convenience
pub use feature_service_impl::FeatureServiceImpl;
pub use memory_store::InMemoryFeatureStore;
