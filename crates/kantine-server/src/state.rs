// crates/kantine-server/src/state.rs
// ============================================================================
// Module: Server State
// Description: Shared application state behind the HTTP surface.
// Purpose: Serialize ledger access, persist snapshots, and resolve sessions.
// Dependencies: axum, kantine-core, kantine-contract, subtle
// ============================================================================

//! ## Overview
//! [`AppState`] owns the ledger, the snapshot store, the session store, and
//! the metrics sink. Mutations are atomic against persistence: the operation
//! runs on a working copy, the snapshot is saved, and only then does the
//! in-memory state advance. A failed save leaves the ledger unchanged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use kantine_contract::SessionRole;
use kantine_core::DepartmentId;
use kantine_core::LedgerError;
use kantine_core::LedgerState;
use kantine_core::LedgerStore;
use subtle::ConstantTimeEq;

use crate::error::ApiError;
use crate::sessions::Session;
use crate::sessions::SessionStore;
use crate::telemetry::MetricsSink;

// ============================================================================
// SECTION: Application State
// ============================================================================

/// Shared state for all request handlers.
pub struct AppState {
    /// Authoritative ledger, serialized behind a mutex.
    ledger: Mutex<LedgerState>,
    /// Snapshot store persisted after every mutation.
    store: Arc<dyn LedgerStore + Send + Sync>,
    /// Live session tokens.
    sessions: Mutex<SessionStore>,
    /// Request telemetry sink.
    metrics: Arc<dyn MetricsSink>,
}

impl AppState {
    /// Builds state from an initial ledger and collaborators.
    #[must_use]
    pub fn new(
        initial: LedgerState,
        store: Arc<dyn LedgerStore + Send + Sync>,
        max_sessions: usize,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        Self {
            ledger: Mutex::new(initial),
            store,
            sessions: Mutex::new(SessionStore::new(max_sessions)),
            metrics,
        }
    }

    /// Returns the metrics sink.
    #[must_use]
    pub fn metrics(&self) -> &Arc<dyn MetricsSink> {
        &self.metrics
    }

    // ------------------------------------------------------------------
    // Ledger access
    // ------------------------------------------------------------------

    /// Runs a read-only operation against the ledger.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the operation fails or the lock is poisoned.
    pub fn read<R>(
        &self,
        op: impl FnOnce(&LedgerState) -> Result<R, LedgerError>,
    ) -> Result<R, ApiError> {
        let guard = self.ledger.lock().map_err(|_| ApiError::internal())?;
        op(&guard).map_err(ApiError::from)
    }

    /// Runs a mutation atomically against persistence.
    ///
    /// The operation runs on a working copy; the snapshot is saved before the
    /// in-memory ledger advances, so a failed save never leaves memory and
    /// disk diverged.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the operation or the snapshot save fails.
    pub fn mutate<R>(
        &self,
        op: impl FnOnce(&mut LedgerState) -> Result<R, LedgerError>,
    ) -> Result<R, ApiError> {
        let mut guard = self.ledger.lock().map_err(|_| ApiError::internal())?;
        let mut next = guard.clone();
        let value = op(&mut next).map_err(ApiError::from)?;
        self.store.save(&next)?;
        *guard = next;
        Ok(value)
    }

    // ------------------------------------------------------------------
    // Sessions
    // ------------------------------------------------------------------

    /// Issues a session token for a department and role.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the session cap is reached or the lock is
    /// poisoned.
    pub fn issue_session(
        &self,
        department_id: DepartmentId,
        role: SessionRole,
    ) -> Result<String, ApiError> {
        let mut guard = self.sessions.lock().map_err(|_| ApiError::internal())?;
        guard.issue(department_id, role).ok_or_else(ApiError::internal)
    }

    /// Resolves the bearer token in the request headers to a session.
    ///
    /// # Errors
    ///
    /// Returns 401 when the header is missing, malformed, or unknown.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Session, ApiError> {
        let token = bearer_token(headers)
            .ok_or_else(|| ApiError::unauthorized("missing bearer token"))?;
        let guard = self.sessions.lock().map_err(|_| ApiError::internal())?;
        guard.resolve(token).ok_or_else(|| ApiError::unauthorized("unknown session token"))
    }

    /// Requires any session scoped to the given department.
    ///
    /// # Errors
    ///
    /// Returns 401 when authentication fails or the scope mismatches.
    pub fn require_department_session(
        &self,
        headers: &HeaderMap,
        department_id: DepartmentId,
    ) -> Result<Session, ApiError> {
        let session = self.authenticate(headers)?;
        if session.department_id != department_id {
            return Err(ApiError::unauthorized("session not scoped to this department"));
        }
        Ok(session)
    }

    /// Requires an admin session scoped to the given department.
    ///
    /// # Errors
    ///
    /// Returns 401 when authentication fails, the role is not admin, or the
    /// scope mismatches.
    pub fn require_admin_session(
        &self,
        headers: &HeaderMap,
        department_id: DepartmentId,
    ) -> Result<Session, ApiError> {
        let session = self.authenticate(headers)?;
        if !session.is_admin_for(department_id) {
            return Err(ApiError::unauthorized("admin session required for this department"));
        }
        Ok(session)
    }

    /// Requires an admin session for any department.
    ///
    /// # Errors
    ///
    /// Returns 401 when authentication fails or the role is not admin.
    pub fn require_any_admin_session(&self, headers: &HeaderMap) -> Result<Session, ApiError> {
        let session = self.authenticate(headers)?;
        if session.role != SessionRole::Admin {
            return Err(ApiError::unauthorized("admin session required"));
        }
        Ok(session)
    }
}

// ============================================================================
// SECTION: Credential Helpers
// ============================================================================

/// Extracts the bearer token from the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    value.strip_prefix("Bearer ")
}

/// Compares a candidate password against the expected one in constant time.
#[must_use]
pub fn verify_password(candidate: &str, expected: &str) -> bool {
    bool::from(candidate.as_bytes().ct_eq(expected.as_bytes()))
}
