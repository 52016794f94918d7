// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for Kantine system-tests.
// Purpose: Provide server harnesses, API clients, and scenario fixtures.
// Dependencies: system-tests, kantine-config, kantine-contract, kantine-server
// ============================================================================

//! ## Overview
//! Shared helpers for Kantine system-tests.
//! Purpose: Provide server harnesses, API clients, and scenario fixtures.
//! Invariants:
//! - System-test execution is deterministic and fail-closed.
//! - Suites never retry; unexpected statuses fail the test immediately.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod client;
pub mod harness;
pub mod readiness;
