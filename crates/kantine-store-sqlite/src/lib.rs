// crates/kantine-store-sqlite/src/lib.rs
// ============================================================================
// Module: Kantine SQLite Store Library
// Description: Durable LedgerStore backed by SQLite WAL.
// Purpose: Persist ledger snapshots with integrity verification.
// Dependencies: kantine-core, rusqlite, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Durable [`kantine_core::LedgerStore`] implementation. Each save appends a
//! canonical JSON snapshot plus its SHA-256 digest to an append-only version
//! table; loads verify the digest and fail closed on corruption.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::MAX_STATE_BYTES;
pub use store::SqliteLedgerStore;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
