// crates/kantine-contract/src/lib.rs
// ============================================================================
// Module: Kantine Contract Library
// Description: Canonical wire types for the Kantine HTTP API.
// Purpose: Provide shared request/response shapes for server and test clients.
// Dependencies: chrono, kantine-core, serde
// ============================================================================

//! ## Overview
//! This crate defines the JSON wire contract of the Kantine HTTP API: request
//! and response bodies for every endpoint, plus the error body shape with
//! stable error codes. The server and the system-test client both depend on
//! these types, so contract drift fails to compile instead of failing at
//! runtime.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod error;
pub mod types;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::ErrorBody;
pub use error::ErrorCode;
pub use error::ErrorDetail;
pub use types::BalancesResponse;
pub use types::CreateDepartmentRequest;
pub use types::CreateEmployeeRequest;
pub use types::DepartmentResponse;
pub use types::EmployeeResponse;
pub use types::GuestAssignmentRequest;
pub use types::GuestAssignmentResponse;
pub use types::HealthResponse;
pub use types::LoginRequest;
pub use types::LoginResponse;
pub use types::LunchSettingsRequest;
pub use types::LunchSettingsResponse;
pub use types::OrderResponse;
pub use types::PlaceOrderRequest;
pub use types::ProfileResponse;
pub use types::SessionRole;
pub use types::SponsorMealRequest;
pub use types::SponsorMealResponse;
pub use types::SubaccountBalances;
