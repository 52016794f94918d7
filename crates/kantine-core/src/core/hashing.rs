// crates/kantine-core/src/core/hashing.rs
// ============================================================================
// Module: Kantine Snapshot Hashing
// Description: Canonical JSON bytes and SHA-256 digests for snapshots.
// Purpose: Let stores verify snapshot integrity and fail closed on corruption.
// Dependencies: serde, serde_json, sha2, thiserror
// ============================================================================

//! ## Overview
//! Ledger snapshots serialize to canonical JSON (ordered maps, stable struct
//! field order) and are stored together with a SHA-256 digest. Loads recompute
//! the digest and fail closed on mismatch.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Hashing and canonicalization errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum HashError {
    /// The value could not be serialized to canonical JSON.
    #[error("canonical serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

// ============================================================================
// SECTION: Digest
// ============================================================================

/// Lowercase hex SHA-256 digest.
///
/// # Invariants
/// - Always 64 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashDigest(String);

impl HashDigest {
    /// Creates a digest from an already-validated hex string.
    #[must_use]
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// Returns the digest as a hex string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HashDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Hashing Operations
// ============================================================================

/// Serializes a value to canonical JSON bytes.
///
/// Canonical here means: ordered map keys (the ledger uses `BTreeMap`
/// throughout) and stable struct field order, so equal states produce equal
/// bytes.
///
/// # Errors
///
/// Returns [`HashError`] when serialization fails.
pub fn canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, HashError> {
    Ok(serde_json::to_vec(value)?)
}

/// Hashes bytes to a lowercase hex SHA-256 digest.
#[must_use]
pub fn hash_bytes(bytes: &[u8]) -> HashDigest {
    use fmt::Write as _;

    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(64);
    for byte in digest {
        let _ = write!(hex, "{byte:02x}");
    }
    HashDigest(hex)
}
