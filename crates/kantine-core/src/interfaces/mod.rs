// crates/kantine-core/src/interfaces/mod.rs
// ============================================================================
// Module: Kantine Core Interfaces
// Description: Persistence interface for ledger snapshots.
// Purpose: Decouple the engine from storage backends.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! The engine persists through [`LedgerStore`]: hosts save a full snapshot
//! after each mutation and load the latest snapshot at startup. Stores verify
//! snapshot integrity via content digests and fail closed on corruption.
//! [`MemoryLedgerStore`] is the reference in-process implementation used by
//! tests and by servers running without durability.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;

use thiserror::Error;

use crate::core::hashing::HashDigest;
use crate::core::hashing::canonical_json_bytes;
use crate::core::hashing::hash_bytes;
use crate::core::ledger::LedgerState;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Ledger store errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Snapshot serialization or deserialization failed.
    #[error("snapshot serialization failed: {0}")]
    Serialization(String),
    /// The stored snapshot digest does not match its bytes.
    #[error("snapshot integrity check failed: {0}")]
    Integrity(String),
    /// The backing store reported an error.
    #[error("store backend error: {0}")]
    Backend(String),
}

// ============================================================================
// SECTION: Store Interface
// ============================================================================

/// Durable snapshot store for ledger state.
pub trait LedgerStore {
    /// Saves a full ledger snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the snapshot cannot be persisted.
    fn save(&self, state: &LedgerState) -> Result<(), StoreError>;

    /// Loads the latest ledger snapshot, if any was ever saved.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the snapshot cannot be read or fails its
    /// integrity check.
    fn load(&self) -> Result<Option<LedgerState>, StoreError>;
}

// ============================================================================
// SECTION: Memory Store
// ============================================================================

/// In-process [`LedgerStore`] holding the latest snapshot in memory.
///
/// # Invariants
/// - Snapshots are verified against their digest on load, like durable
///   stores, so corruption bugs surface in tests too.
#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    /// Latest snapshot bytes and digest.
    snapshot: Mutex<Option<(Vec<u8>, HashDigest)>>,
}

impl MemoryLedgerStore {
    /// Creates an empty memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn save(&self, state: &LedgerState) -> Result<(), StoreError> {
        let bytes =
            canonical_json_bytes(state).map_err(|err| StoreError::Serialization(err.to_string()))?;
        let digest = hash_bytes(&bytes);
        let mut guard = self
            .snapshot
            .lock()
            .map_err(|_| StoreError::Backend("memory store mutex poisoned".to_string()))?;
        *guard = Some((bytes, digest));
        Ok(())
    }

    fn load(&self) -> Result<Option<LedgerState>, StoreError> {
        let guard = self
            .snapshot
            .lock()
            .map_err(|_| StoreError::Backend("memory store mutex poisoned".to_string()))?;
        let Some((bytes, digest)) = guard.as_ref() else {
            return Ok(None);
        };
        if hash_bytes(bytes) != *digest {
            return Err(StoreError::Integrity("memory snapshot digest mismatch".to_string()));
        }
        let state = serde_json::from_slice(bytes)
            .map_err(|err| StoreError::Serialization(err.to_string()))?;
        Ok(Some(state))
    }
}
