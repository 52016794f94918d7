// crates/kantine-server/src/error.rs
// ============================================================================
// Module: Server Error Mapping
// Description: Map ledger and auth failures onto the wire error contract.
// Purpose: Keep status codes and error codes stable for clients.
// Dependencies: axum, kantine-contract, kantine-core
// ============================================================================

//! ## Overview
//! [`ApiError`] is the single error type handlers return. Ledger errors map
//! onto 400/404 with stable codes; authentication failures map onto 401;
//! store failures map onto 500 without leaking backend detail. Malformed
//! JSON bodies are rejected by the extractor layer before handlers run (422).

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use kantine_contract::ErrorBody;
use kantine_contract::ErrorCode;
use kantine_core::LedgerError;
use kantine_core::StoreError;

// ============================================================================
// SECTION: API Error
// ============================================================================

/// Error carried out of handlers and rendered as the wire error envelope.
///
/// # Invariants
/// - `status` and `body.error.code` stay consistent with the contract table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code.
    pub status: StatusCode,
    /// Wire error body.
    pub body: ErrorBody,
}

impl ApiError {
    /// Builds an error from parts.
    #[must_use]
    pub fn new(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody::new(code, message),
        }
    }

    /// 401 with the invalid-credentials code.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, ErrorCode::InvalidCredentials, message)
    }

    /// 404 with the not-found code.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ErrorCode::NotFound, message)
    }

    /// 400 with the validation code.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ErrorCode::Validation, message)
    }

    /// 500 with the internal code; backend detail stays out of the body.
    #[must_use]
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Internal, "internal error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err {
            LedgerError::UnknownDepartment(_)
            | LedgerError::UnknownEmployee(_)
            | LedgerError::UnknownOrder(_)
            | LedgerError::NotOrderOwner { .. } => {
                Self::new(StatusCode::NOT_FOUND, ErrorCode::NotFound, message)
            }
            LedgerError::AlreadySponsored { .. } => {
                Self::new(StatusCode::BAD_REQUEST, ErrorCode::AlreadySponsored, message)
            }
            LedgerError::DepartmentExists(_)
            | LedgerError::NoGuestAccount { .. }
            | LedgerError::UnknownTopping(_)
            | LedgerError::UnknownMenuItem(_)
            | LedgerError::LunchPriceUnset(_)
            | LedgerError::AlreadyCancelled(_)
            | LedgerError::OrderSponsored(_)
            | LedgerError::NothingToSponsor { .. }
            | LedgerError::SponsorNotEligible(_)
            | LedgerError::Validation(_)
            | LedgerError::IdentifierExhausted => {
                Self::new(StatusCode::BAD_REQUEST, ErrorCode::Validation, message)
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(_: StoreError) -> Self {
        Self::internal()
    }
}
