// crates/kantine-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Ledger Store
// Description: Durable LedgerStore backed by SQLite WAL.
// Purpose: Persist ledger snapshots with deterministic serialization.
// Dependencies: kantine-core, rusqlite, serde_json, thiserror
// ============================================================================

//! ## Overview
//! This module implements a durable [`LedgerStore`] using `SQLite`. Each save
//! produces a canonical JSON snapshot stored in an append-only version table.
//! Loads verify integrity via stored hashes and fail closed on corruption.
//! Database contents are treated as untrusted on load.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use kantine_core::LedgerState;
use kantine_core::LedgerStore;
use kantine_core::StoreError;
use kantine_core::canonical_json_bytes;
use kantine_core::hash_bytes;
use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::params;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `SQLite` schema version for the store.
const SCHEMA_VERSION: i64 = 1;
/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Maximum ledger snapshot size accepted by the store.
pub const MAX_STATE_BYTES: usize = 16 * 1024 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// SQLite store errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// The database could not be opened or initialized.
    #[error("sqlite open failed: {0}")]
    Open(String),
    /// The stored schema version does not match this build.
    #[error("sqlite schema version mismatch: found {found}, expected {expected}")]
    SchemaVersion {
        /// Version found in the database.
        found: i64,
        /// Version this build writes.
        expected: i64,
    },
    /// A statement failed to execute.
    #[error("sqlite statement failed: {0}")]
    Statement(String),
}

impl From<SqliteStoreError> for StoreError {
    fn from(err: SqliteStoreError) -> Self {
        Self::Backend(err.to_string())
    }
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// SQLite store configuration.
///
/// # Invariants
/// - `path` points at a writable database file location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteStoreConfig {
    /// Database file path.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    pub busy_timeout_ms: u64,
}

impl SqliteStoreConfig {
    /// Builds a config for a database path with default timeouts.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// Durable [`LedgerStore`] backed by `SQLite` WAL.
///
/// # Invariants
/// - Snapshots are append-only; the latest version wins on load.
/// - Every load verifies the stored digest before deserializing.
pub struct SqliteLedgerStore {
    /// Serialized access to the connection.
    connection: Mutex<Connection>,
}

impl SqliteLedgerStore {
    /// Opens (and if needed initializes) the store at the configured path.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the database cannot be opened, the
    /// schema cannot be created, or an existing schema version mismatches.
    pub fn open(config: &SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        let connection = Connection::open(&config.path)
            .map_err(|err| SqliteStoreError::Open(err.to_string()))?;
        connection
            .pragma_update(None, "journal_mode", "WAL")
            .map_err(|err| SqliteStoreError::Open(err.to_string()))?;
        connection
            .pragma_update(None, "synchronous", "FULL")
            .map_err(|err| SqliteStoreError::Open(err.to_string()))?;
        connection
            .busy_timeout(std::time::Duration::from_millis(config.busy_timeout_ms))
            .map_err(|err| SqliteStoreError::Open(err.to_string()))?;
        initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    /// Opens the store with default settings for a path.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] as for [`SqliteLedgerStore::open`].
    pub fn open_path(path: &Path) -> Result<Self, SqliteStoreError> {
        Self::open(&SqliteStoreConfig::new(path))
    }

    /// Returns the number of stored snapshot versions.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the count query fails.
    pub fn version_count(&self) -> Result<u64, StoreError> {
        let connection = self.lock()?;
        let count: i64 = connection
            .query_row("SELECT COUNT(*) FROM ledger_snapshots", [], |row| row.get(0))
            .map_err(|err| StoreError::Backend(err.to_string()))?;
        u64::try_from(count).map_err(|err| StoreError::Backend(err.to_string()))
    }

    /// Locks the connection, mapping poisoning to a backend error.
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
        self.connection
            .lock()
            .map_err(|_| StoreError::Backend("sqlite store mutex poisoned".to_string()))
    }
}

impl LedgerStore for SqliteLedgerStore {
    fn save(&self, state: &LedgerState) -> Result<(), StoreError> {
        let bytes =
            canonical_json_bytes(state).map_err(|err| StoreError::Serialization(err.to_string()))?;
        if bytes.len() > MAX_STATE_BYTES {
            return Err(StoreError::Serialization("ledger snapshot too large".to_string()));
        }
        let digest = hash_bytes(&bytes);
        let saved_at_ms = epoch_millis();
        let connection = self.lock()?;
        connection
            .execute(
                "INSERT INTO ledger_snapshots (saved_at_ms, snapshot, digest) VALUES (?1, ?2, ?3)",
                params![saved_at_ms, bytes, digest.as_str()],
            )
            .map_err(|err| StoreError::Backend(err.to_string()))?;
        Ok(())
    }

    fn load(&self) -> Result<Option<LedgerState>, StoreError> {
        let connection = self.lock()?;
        let row: Option<(Vec<u8>, String)> = connection
            .query_row(
                "SELECT snapshot, digest FROM ledger_snapshots ORDER BY id DESC LIMIT 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(|err| StoreError::Backend(err.to_string()))?;
        let Some((bytes, digest)) = row else {
            return Ok(None);
        };
        if hash_bytes(&bytes).as_str() != digest {
            return Err(StoreError::Integrity("sqlite snapshot digest mismatch".to_string()));
        }
        let state = serde_json::from_slice(&bytes)
            .map_err(|err| StoreError::Serialization(err.to_string()))?;
        Ok(Some(state))
    }
}

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Creates tables and verifies the schema version.
fn initialize_schema(connection: &Connection) -> Result<(), SqliteStoreError> {
    connection
        .execute_batch(
            "CREATE TABLE IF NOT EXISTS schema_meta (
                key TEXT PRIMARY KEY,
                value INTEGER NOT NULL
            );
            CREATE TABLE IF NOT EXISTS ledger_snapshots (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                saved_at_ms INTEGER NOT NULL,
                snapshot BLOB NOT NULL,
                digest TEXT NOT NULL
            );",
        )
        .map_err(|err| SqliteStoreError::Statement(err.to_string()))?;
    let existing: Option<i64> = connection
        .query_row(
            "SELECT value FROM schema_meta WHERE key = 'schema_version'",
            [],
            |row| row.get(0),
        )
        .optional()
        .map_err(|err| SqliteStoreError::Statement(err.to_string()))?;
    match existing {
        Some(found) if found != SCHEMA_VERSION => Err(SqliteStoreError::SchemaVersion {
            found,
            expected: SCHEMA_VERSION,
        }),
        Some(_) => Ok(()),
        None => {
            connection
                .execute(
                    "INSERT INTO schema_meta (key, value) VALUES ('schema_version', ?1)",
                    params![SCHEMA_VERSION],
                )
                .map_err(|err| SqliteStoreError::Statement(err.to_string()))?;
            Ok(())
        }
    }
}

// ============================================================================
// SECTION: Time
// ============================================================================

/// Milliseconds since the Unix epoch, saturating at zero.
fn epoch_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| i64::try_from(duration.as_millis()).unwrap_or(i64::MAX))
}
