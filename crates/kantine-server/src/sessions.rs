// crates/kantine-server/src/sessions.rs
// ============================================================================
// Module: Server Sessions
// Description: Department-scoped bearer sessions for the HTTP surface.
// Purpose: Issue opaque tokens and resolve them to role + department scope.
// Dependencies: kantine-contract, kantine-core, rand
// ============================================================================

//! ## Overview
//! Logins issue random 32-hex bearer tokens bound to a department and a role.
//! Tokens are opaque; the store caps live sessions and fails closed when the
//! cap is reached. Tokens never leave the process except through the login
//! response.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;

use kantine_contract::SessionRole;
use kantine_core::DepartmentId;
use rand::Rng;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Token length in bytes before hex encoding.
const TOKEN_BYTES: usize = 16;

// ============================================================================
// SECTION: Session
// ============================================================================

/// Resolved session scope.
///
/// # Invariants
/// - A session grants its role only within its department.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    /// Department the session is scoped to.
    pub department_id: DepartmentId,
    /// Granted role.
    pub role: SessionRole,
}

impl Session {
    /// Returns true when the session grants admin rights in the department.
    #[must_use]
    pub fn is_admin_for(&self, department_id: DepartmentId) -> bool {
        self.role == SessionRole::Admin && self.department_id == department_id
    }
}

// ============================================================================
// SECTION: Session Store
// ============================================================================

/// In-memory session store.
///
/// # Invariants
/// - At most `max_sessions` tokens are live at a time.
#[derive(Debug)]
pub struct SessionStore {
    /// Live sessions by token.
    sessions: HashMap<String, Session>,
    /// Maximum number of live sessions.
    max_sessions: usize,
}

impl SessionStore {
    /// Creates a store with a live-session cap.
    #[must_use]
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: HashMap::new(),
            max_sessions,
        }
    }

    /// Issues a token for a department and role.
    ///
    /// Returns `None` when the live-session cap is reached.
    #[must_use]
    pub fn issue(&mut self, department_id: DepartmentId, role: SessionRole) -> Option<String> {
        if self.sessions.len() >= self.max_sessions {
            return None;
        }
        let token = generate_token();
        self.sessions.insert(
            token.clone(),
            Session {
                department_id,
                role,
            },
        );
        Some(token)
    }

    /// Resolves a token to its session scope.
    #[must_use]
    pub fn resolve(&self, token: &str) -> Option<Session> {
        self.sessions.get(token).copied()
    }

    /// Returns the number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns true when no session is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

// ============================================================================
// SECTION: Token Generation
// ============================================================================

/// Generates a random 32-hex token.
fn generate_token() -> String {
    use std::fmt::Write as _;

    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill(&mut bytes[..]);
    let mut token = String::with_capacity(TOKEN_BYTES * 2);
    for byte in bytes {
        let _ = write!(token, "{byte:02x}");
    }
    token
}
