// system-tests/src/lib.rs
// ============================================================================
// Module: Kantine System Tests Library
// Description: Shared configuration for system test scenarios.
// Purpose: Provide common timeout settings for Kantine system-test binaries.
// Dependencies: std
// ============================================================================

//! ## Overview
//! This crate hosts shared configuration used by the Kantine system-test
//! binaries in `system-tests/tests`. System-test inputs are untrusted; every
//! suite fails fast on unexpected statuses instead of retrying.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
