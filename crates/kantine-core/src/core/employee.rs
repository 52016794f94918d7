// crates/kantine-core/src/core/employee.rs
// ============================================================================
// Module: Kantine Employee Model
// Description: Employees with home balances and guest subaccounts.
// Purpose: Track who owes what, split by meal kind and by department.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Each employee carries two signed balances in the home department (breakfast
//! and drinks/sweets) plus a subaccount pair per guest department. Negative
//! balances are debt. Guest activity posts only to the matching subaccount;
//! the home pair is never touched by orders placed elsewhere.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::DepartmentId;
use crate::core::identifiers::EmployeeId;
use crate::core::money::Cents;

// ============================================================================
// SECTION: Balances
// ============================================================================

/// Signed balance pair of one account.
///
/// # Invariants
/// - Negative values are debt, positive values are credit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalances {
    /// Balance for breakfast orders (rolls, eggs, coffee, lunch).
    pub breakfast: Cents,
    /// Balance for drinks and sweets orders.
    pub drinks_sweets: Cents,
}

// ============================================================================
// SECTION: Employee
// ============================================================================

/// Employee record.
///
/// # Invariants
/// - `department_id` is the home department; `subaccounts` never contains it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Employee identifier.
    pub id: EmployeeId,
    /// Employee display name.
    pub name: String,
    /// Home department.
    pub department_id: DepartmentId,
    /// Home account balances.
    pub balances: AccountBalances,
    /// Guest subaccounts keyed by guest department.
    pub subaccounts: BTreeMap<DepartmentId, AccountBalances>,
}

impl Employee {
    /// Returns the balance pair for activity in the given department, if open.
    ///
    /// The home department always resolves; guest departments resolve only
    /// after a guest assignment opened the subaccount.
    #[must_use]
    pub fn account(&self, department_id: DepartmentId) -> Option<&AccountBalances> {
        if department_id == self.department_id {
            Some(&self.balances)
        } else {
            self.subaccounts.get(&department_id)
        }
    }

    /// Mutable variant of [`Employee::account`].
    #[must_use]
    pub fn account_mut(&mut self, department_id: DepartmentId) -> Option<&mut AccountBalances> {
        if department_id == self.department_id {
            Some(&mut self.balances)
        } else {
            self.subaccounts.get_mut(&department_id)
        }
    }
}
