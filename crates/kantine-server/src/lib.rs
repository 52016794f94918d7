// crates/kantine-server/src/lib.rs
// ============================================================================
// Module: Kantine Server Library
// Description: Axum HTTP surface for the canteen ledger engine.
// Purpose: Expose the wire contract with sessions, telemetry, and persistence.
// Dependencies: axum, chrono, kantine-config, kantine-contract, kantine-core,
// kantine-store-sqlite, rand, serde, subtle, thiserror, tokio
// ============================================================================

//! ## Overview
//! The Kantine server wires the ledger engine to HTTP: department and admin
//! logins issue session tokens, every mutation persists a snapshot through the
//! configured [`kantine_core::LedgerStore`], and request telemetry flows
//! through a dependency-light metrics sink. All inputs are untrusted and
//! validated fail-closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod error;
pub mod routes;
pub mod server;
pub mod sessions;
pub mod state;
pub mod telemetry;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::ApiError;
pub use routes::build_router;
pub use server::KantineServer;
pub use server::ServerError;
pub use server::ServerHandle;
pub use sessions::Session;
pub use sessions::SessionStore;
pub use state::AppState;
pub use telemetry::MemoryMetricsSink;
pub use telemetry::MetricsSink;
pub use telemetry::NoopMetricsSink;
pub use telemetry::RequestMetricEvent;
