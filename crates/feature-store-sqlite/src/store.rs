// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! SQLite implementation of the feature store contract

use async_trait::async_trait;
use feature_services::{Feature, FeatureStore, NewFeature, StoreResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, trace};

use crate::config::SqliteStoreConfig;
use crate::error::SqliteStoreError;
use crate::pool::ConnectionPool;
use crate::schema::{initialize_schema, open_connection, FEATURE_COLUMNS};

/// `FeatureStore` over a SQLite database file
pub struct SqliteFeatureStore {
    pool: Arc<ConnectionPool>,
    path: PathBuf,
}

impl SqliteFeatureStore {
    /// Opens (and if needed creates) the database described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the configuration is invalid, the
    /// database cannot be opened, or its schema version is unknown.
    pub fn open(config: SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        config.validate()?;
        let pool_size = config.effective_pool_size();

        let mut first = open_connection(&config)?;
        initialize_schema(&mut first)?;
        let mut connections = Vec::with_capacity(pool_size);
        connections.push(first);
        for _ in 1..pool_size {
            connections.push(open_connection(&config)?);
        }

        info!(
            target: "feature-store-sqlite",
            "Opened feature store at {} ({} connection(s))",
            config.path.display(),
            pool_size
        );

        Ok(Self {
            pool: Arc::new(ConnectionPool::new(connections)),
            path: config.path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pool_size(&self) -> usize {
        self.pool.size()
    }

    /// Run `f` on a pooled connection inside tokio's blocking pool.
    async fn with_connection<T, F>(&self, operation: &'static str, f: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let pool = Arc::clone(&self.pool);
        let outcome = tokio::task::spawn_blocking(move || {
            let connection = pool.acquire();
            f(&connection)
        })
        .await
        .map_err(|e| SqliteStoreError::Join(format!("{}: {}", operation, e)))?;

        outcome.map_err(|e| {
            debug!(target: "feature-store-sqlite", "{} failed: {}", operation, e);
            SqliteStoreError::Db(e).into()
        })
    }
}

fn feature_from_row(row: &Row<'_>) -> rusqlite::Result<Feature> {
    Ok(Feature {
        locus: row.get(0)?,
        term: row.get(1)?,
        rank: row.get(2)?,
        accession: row.get(3)?,
        sequence: row.get(4)?,
    })
}

fn query_features<P: rusqlite::Params>(
    connection: &Connection,
    sql: &str,
    params: P,
) -> rusqlite::Result<Vec<Feature>> {
    let mut statement = connection.prepare_cached(sql)?;
    let features = statement
        .query_map(params, feature_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(features)
}

#[async_trait]
impl FeatureStore for SqliteFeatureStore {
    async fn find_by_key(
        &self,
        locus: &str,
        term: &str,
        rank: i32,
        accession: i64,
    ) -> StoreResult<Option<Feature>> {
        let (locus, term) = (locus.to_string(), term.to_string());
        self.with_connection("find_by_key", move |connection| {
            connection
                .prepare_cached(&format!(
                    "SELECT {} FROM feature \
                     WHERE locus = ?1 AND term = ?2 AND rank = ?3 AND accession = ?4",
                    FEATURE_COLUMNS
                ))?
                .query_row(params![locus, term, rank, accession], feature_from_row)
                .optional()
        })
        .await
    }

    async fn insert(&self, feature: NewFeature) -> StoreResult<Feature> {
        let created = self
            .with_connection("insert", move |connection| {
                connection.execute(
                    "INSERT INTO feature (locus, term, rank, sequence) VALUES (?1, ?2, ?3, ?4)",
                    params![feature.locus, feature.term, feature.rank, feature.sequence],
                )?;
                let accession = connection.last_insert_rowid();
                Ok(feature.into_feature(accession))
            })
            .await?;
        trace!(target: "feature-store-sqlite", "inserted accession {}", created.accession);
        Ok(created)
    }

    async fn find_by_locus(&self, locus: &str) -> StoreResult<Vec<Feature>> {
        let locus = locus.to_string();
        self.with_connection("find_by_locus", move |connection| {
            query_features(
                connection,
                &format!(
                    "SELECT {} FROM feature WHERE locus = ?1 \
                     ORDER BY term, rank, accession",
                    FEATURE_COLUMNS
                ),
                params![locus],
            )
        })
        .await
    }

    async fn find_by_locus_and_term(&self, locus: &str, term: &str) -> StoreResult<Vec<Feature>> {
        let (locus, term) = (locus.to_string(), term.to_string());
        self.with_connection("find_by_locus_and_term", move |connection| {
            query_features(
                connection,
                &format!(
                    "SELECT {} FROM feature WHERE locus = ?1 AND term = ?2 \
                     ORDER BY term, rank, accession",
                    FEATURE_COLUMNS
                ),
                params![locus, term],
            )
        })
        .await
    }

    async fn find_by_locus_term_rank(
        &self,
        locus: &str,
        term: &str,
        rank: i32,
    ) -> StoreResult<Vec<Feature>> {
        let (locus, term) = (locus.to_string(), term.to_string());
        self.with_connection("find_by_locus_term_rank", move |connection| {
            query_features(
                connection,
                &format!(
                    "SELECT {} FROM feature WHERE locus = ?1 AND term = ?2 AND rank = ?3 \
                     ORDER BY term, rank, accession",
                    FEATURE_COLUMNS
                ),
                params![locus, term, rank],
            )
        })
        .await
    }

    async fn ping(&self) -> StoreResult<()> {
        self.with_connection("ping", |connection| {
            connection.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
            Ok(())
        })
        .await
    }
}
