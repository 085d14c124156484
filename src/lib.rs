//! # feature-service
//!
//! A REST service that creates and retrieves *features*: enumerated, ranked
//! annotations (locus, ontology term, rank, accession, optional sequence)
//! attached to a genomic locus.
//!
//! ## Quick Start
//!
//! ```bash
//! feature-server --database ./features.db --port 8080
//! curl -X POST localhost:8080/features \
//!      -d '{"locus":"HLA-A","term":"SO:0001217","rank":1,"sequence":"ACGT"}'
//! curl 'localhost:8080/features/HLA-A'
//! ```
//!
//! ## Architecture
//!
//! ```text
//! api (axum router) ──> services (validation) ──> FeatureStore
//!                                                   ├── store_sqlite (production)
//!                                                   └── InMemoryFeatureStore (tests, --memory)
//! ```
//!
//! ## Embedding
//!
//! ```rust,no_run
//! use feature_service::{build_router, config::FeatureConfig};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = FeatureConfig::default();
//! let app = build_router(&config)?;
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - **`file-logging`**: JSON log files under timestamped run directories
//!
//! ## License
//!
//! Apache-2.0

// Re-export foundation
pub use feature_config as config;
pub use feature_observability as observability;

// Re-export domain and infrastructure
pub use feature_api as api;
pub use feature_services as services;
pub use feature_store_sqlite as store_sqlite;

pub mod server;

pub use server::{build_router, build_state, open_store};

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::api::{create_http_server, ApiState, NotFoundPolicy};
    pub use crate::config::{load_config_or_default, validate_config, FeatureConfig};
    pub use crate::services::{
        Feature, FeatureService, FeatureServiceImpl, FeatureStore, InMemoryFeatureStore,
        ServiceError,
    };
    pub use crate::store_sqlite::{SqliteFeatureStore, SqliteStoreConfig};
}
