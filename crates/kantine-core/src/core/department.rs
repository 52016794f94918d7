// crates/kantine-core/src/core/department.rs
// ============================================================================
// Module: Kantine Department Model
// Description: Tenant-like organizational unit with credentials and prices.
// Purpose: Scope employees, orders, and menus to a department.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A department is the tenant unit of the canteen system: it owns its menu
//! prices, its lunch price schedule, and the two credential strings used by
//! the HTTP layer (employee login and admin login). Employees belong to
//! exactly one home department and may hold guest subaccounts elsewhere.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::DepartmentId;
use crate::core::menu::PriceList;

// ============================================================================
// SECTION: Department
// ============================================================================

/// Department record.
///
/// # Invariants
/// - `name` is unique across the ledger.
/// - Credentials are opaque strings; comparison policy lives in the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Department identifier.
    pub id: DepartmentId,
    /// Unique department name.
    pub name: String,
    /// Password for employee-level logins.
    pub employee_password: String,
    /// Password for admin-level logins.
    pub admin_password: String,
    /// Department price list.
    pub prices: PriceList,
}

/// Payload for creating a department.
///
/// # Invariants
/// - `name` must not collide with an existing department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDepartment {
    /// Unique department name.
    pub name: String,
    /// Password for employee-level logins.
    pub employee_password: String,
    /// Password for admin-level logins.
    pub admin_password: String,
    /// Initial price list.
    pub prices: PriceList,
}
