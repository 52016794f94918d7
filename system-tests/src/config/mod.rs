// system-tests/src/config/mod.rs
// ============================================================================
// Module: System Test Configuration
// Description: Timeout settings with environment overrides.
// Purpose: Keep suite pacing adjustable without editing tests.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Central timeout knobs for the system-test suites. Values can be raised via
//! environment variables on slow machines; suites never retry, they only wait
//! longer.

use std::time::Duration;

/// Default per-request client timeout in milliseconds.
const DEFAULT_CLIENT_TIMEOUT_MS: u64 = 5_000;
/// Default readiness polling budget in milliseconds.
const DEFAULT_READINESS_TIMEOUT_MS: u64 = 5_000;

/// Per-request client timeout (`KANTINE_TEST_CLIENT_TIMEOUT_MS`).
#[must_use]
pub fn client_timeout() -> Duration {
    Duration::from_millis(env_ms("KANTINE_TEST_CLIENT_TIMEOUT_MS", DEFAULT_CLIENT_TIMEOUT_MS))
}

/// Readiness polling budget (`KANTINE_TEST_READINESS_TIMEOUT_MS`).
#[must_use]
pub fn readiness_timeout() -> Duration {
    Duration::from_millis(env_ms("KANTINE_TEST_READINESS_TIMEOUT_MS", DEFAULT_READINESS_TIMEOUT_MS))
}

/// Reads a millisecond override from the environment.
fn env_ms(key: &str, default: u64) -> u64 {
    std::env::var(key).ok().and_then(|raw| raw.parse().ok()).unwrap_or(default)
}
