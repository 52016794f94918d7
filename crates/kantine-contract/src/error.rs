// crates/kantine-contract/src/error.rs
// ============================================================================
// Module: Contract Error Body
// Description: Stable JSON error envelope for the Kantine HTTP API.
// Purpose: Give clients a programmatic code plus a human-readable message.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Every non-2xx response carries this envelope. `code` is stable for
//! programmatic handling; `message` is free-form and may be localized (the
//! already-sponsored rejection keeps its original German wording, which
//! clients match by substring).

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Error Codes
// ============================================================================

/// Stable API error codes.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Login failed or the session token is missing, invalid, or lacks the
    /// required role or department scope.
    InvalidCredentials,
    /// A referenced resource does not exist.
    NotFound,
    /// The request violated a domain rule.
    Validation,
    /// The meal component was already sponsored for this date.
    AlreadySponsored,
    /// The server failed internally; the request may be retried.
    Internal,
}

// ============================================================================
// SECTION: Error Body
// ============================================================================

/// Inner error detail.
///
/// # Invariants
/// - `message` is human-readable and not contract-stable beyond documented
///   substrings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Stable error code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
}

/// Top-level error envelope.
///
/// # Invariants
/// - Serialized as `{"error": {"code": ..., "message": ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error detail.
    pub error: ErrorDetail,
}

impl ErrorBody {
    /// Builds an error body from a code and message.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code,
                message: message.into(),
            },
        }
    }
}
