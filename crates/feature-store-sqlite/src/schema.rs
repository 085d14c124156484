// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Connection setup and schema management

use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use std::time::Duration;

use crate::config::SqliteStoreConfig;
use crate::error::SqliteStoreError;

/// Schema version written to `store_meta`.
pub(crate) const SCHEMA_VERSION: i64 = 1;

/// Columns in the order `feature_from_row` reads them.
pub(crate) const FEATURE_COLUMNS: &str = "locus, term, rank, accession, sequence";

pub(crate) fn open_connection(config: &SqliteStoreConfig) -> Result<Connection, SqliteStoreError> {
    let connection = if config.is_in_memory() {
        Connection::open_in_memory()?
    } else {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        Connection::open_with_flags(&config.path, flags)?
    };
    apply_pragmas(&connection, config)?;
    Ok(connection)
}

fn apply_pragmas(connection: &Connection, config: &SqliteStoreConfig) -> Result<(), SqliteStoreError> {
    connection.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
    if !config.is_in_memory() {
        // journal_mode answers with the mode in effect
        let _mode: String =
            connection.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        connection.execute_batch("PRAGMA synchronous = NORMAL;")?;
    }
    Ok(())
}

/// Create the schema on an empty database or check the stored version.
pub(crate) fn initialize_schema(connection: &mut Connection) -> Result<(), SqliteStoreError> {
    let tx = connection.transaction()?;
    tx.execute_batch("CREATE TABLE IF NOT EXISTS store_meta (version INTEGER NOT NULL);")?;
    let version: Option<i64> = tx
        .query_row("SELECT version FROM store_meta LIMIT 1", params![], |row| row.get(0))
        .optional()?;
    match version {
        None => {
            tx.execute("INSERT INTO store_meta (version) VALUES (?1)", params![SCHEMA_VERSION])?;
            tx.execute_batch(
                "CREATE TABLE IF NOT EXISTS feature (
                    accession INTEGER PRIMARY KEY AUTOINCREMENT,
                    locus TEXT NOT NULL,
                    term TEXT NOT NULL,
                    rank INTEGER NOT NULL CHECK (rank >= 1),
                    sequence TEXT
                );
                CREATE INDEX IF NOT EXISTS idx_feature_locus_term_rank
                    ON feature (locus, term, rank);",
            )?;
        }
        Some(found) if found == SCHEMA_VERSION => {}
        Some(found) => {
            return Err(SqliteStoreError::SchemaMismatch {
                found,
                expected: SCHEMA_VERSION,
            });
        }
    }
    tx.commit()?;
    Ok(())
}
