// crates/kantine-core/src/core/summary.rs
// ============================================================================
// Module: Kantine Aggregation Views
// Description: Shopping list, daily summary, and breakfast history.
// Purpose: Aggregate non-cancelled orders per department and date.
// Dependencies: chrono, serde
// ============================================================================

//! ## Overview
//! Aggregation views over the ledger. The shopping list sums raw ingredient
//! quantities for procurement and is independent of who ultimately pays:
//! sponsoring changes payment attribution, never quantities. Cancelled orders
//! are excluded from every view.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::DepartmentId;
use crate::core::identifiers::EmployeeId;
use crate::core::ledger::LedgerError;
use crate::core::ledger::LedgerState;
use crate::core::money::Cents;
use crate::core::order::OrderType;

// ============================================================================
// SECTION: Shopping List
// ============================================================================

/// Raw ingredient quantities needed for one date.
///
/// # Invariants
/// - Quantities cover non-cancelled breakfast orders only.
/// - Sponsoring does not change any quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingList {
    /// Total roll halves.
    pub total_halves: u32,
    /// White roll halves.
    pub white_halves: u32,
    /// Seeded roll halves.
    pub seeded_halves: u32,
    /// Boiled eggs.
    pub boiled_eggs: u32,
    /// Fried eggs.
    pub fried_eggs: u32,
}

// ============================================================================
// SECTION: Daily Summary
// ============================================================================

/// Per-employee monetary total for one date.
///
/// # Invariants
/// - `total_price` sums signed order totals, so drinks and sweets subtract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDayTotal {
    /// Employee identifier.
    pub employee_id: EmployeeId,
    /// Employee display name.
    pub employee_name: String,
    /// Signed sum of the employee's order totals for the date.
    pub total_price: Cents,
}

/// Daily aggregation for one department and date.
///
/// # Invariants
/// - Covers non-cancelled orders of every type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Department the summary covers.
    pub department_id: DepartmentId,
    /// Date the summary covers.
    pub date: NaiveDate,
    /// Procurement quantities.
    pub shopping_list: ShoppingList,
    /// Per-employee totals, ordered by employee identifier.
    pub employee_totals: Vec<EmployeeDayTotal>,
    /// Signed sum across all employee totals.
    pub total_amount: Cents,
    /// Number of lunch orders.
    pub lunch_count: u32,
    /// Number of coffee orders.
    pub coffee_count: u32,
}

// ============================================================================
// SECTION: Breakfast History
// ============================================================================

/// One employee's breakfast order in the history view.
///
/// # Invariants
/// - Sponsored entries keep their quantities; only attribution flags change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakfastHistoryEntry {
    /// Employee identifier.
    pub employee_id: EmployeeId,
    /// Employee display name.
    pub employee_name: String,
    /// Total roll halves.
    pub total_halves: u32,
    /// White roll halves.
    pub white_halves: u32,
    /// Seeded roll halves.
    pub seeded_halves: u32,
    /// Selected toppings.
    pub toppings: Vec<String>,
    /// Boiled eggs.
    pub boiled_eggs: u32,
    /// Fried eggs.
    pub fried_eggs: u32,
    /// Whether the order includes a coffee.
    pub has_coffee: bool,
    /// Whether the order includes the day's lunch.
    pub has_lunch: bool,
    /// Signed order total.
    pub total_price: Cents,
    /// Whether any component is sponsored.
    pub is_sponsored: bool,
    /// Comma-joined sponsored components, breakfast first.
    pub sponsored_meal_type: String,
}

/// Per-date breakfast aggregation for one department.
///
/// # Invariants
/// - Entries cover non-cancelled breakfast orders only, in order identifier
///   order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakfastHistory {
    /// Department the history covers.
    pub department_id: DepartmentId,
    /// Date the history covers.
    pub date: NaiveDate,
    /// Per-order entries.
    pub entries: Vec<BreakfastHistoryEntry>,
    /// Procurement quantities for the date.
    pub shopping_list: ShoppingList,
    /// Sum of entry totals.
    pub total_amount: Cents,
}

// ============================================================================
// SECTION: Aggregation Operations
// ============================================================================

impl LedgerState {
    /// Builds the shopping list for one department and date.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnknownDepartment`] when the department is
    /// absent.
    pub fn shopping_list(
        &self,
        department_id: DepartmentId,
        date: NaiveDate,
    ) -> Result<ShoppingList, LedgerError> {
        self.department(department_id)?;
        let mut list = ShoppingList::default();
        for order in self.orders() {
            if order.department_id != department_id || order.date != date || order.is_cancelled {
                continue;
            }
            let Some(breakfast) = order.items.as_breakfast() else {
                continue;
            };
            list.total_halves = list.total_halves.saturating_add(breakfast.total_halves);
            list.white_halves = list.white_halves.saturating_add(breakfast.white_halves);
            list.seeded_halves = list.seeded_halves.saturating_add(breakfast.seeded_halves);
            list.boiled_eggs = list.boiled_eggs.saturating_add(breakfast.boiled_eggs);
            list.fried_eggs = list.fried_eggs.saturating_add(breakfast.fried_eggs);
        }
        Ok(list)
    }

    /// Builds the daily summary for one department and date.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when the department or a referenced employee is
    /// absent.
    pub fn daily_summary(
        &self,
        department_id: DepartmentId,
        date: NaiveDate,
    ) -> Result<DailySummary, LedgerError> {
        let shopping_list = self.shopping_list(department_id, date)?;
        let mut totals: BTreeMap<EmployeeId, Cents> = BTreeMap::new();
        let mut total_amount = Cents::ZERO;
        let mut lunch_count = 0u32;
        let mut coffee_count = 0u32;
        for order in self.orders() {
            if order.department_id != department_id || order.date != date || order.is_cancelled {
                continue;
            }
            *totals.entry(order.employee_id).or_default() += order.total_price;
            total_amount += order.total_price;
            if let Some(breakfast) = order.items.as_breakfast() {
                if breakfast.has_lunch {
                    lunch_count = lunch_count.saturating_add(1);
                }
                if breakfast.has_coffee {
                    coffee_count = coffee_count.saturating_add(1);
                }
            }
        }
        let mut employee_totals = Vec::with_capacity(totals.len());
        for (employee_id, total_price) in totals {
            let employee = self.employee(employee_id)?;
            employee_totals.push(EmployeeDayTotal {
                employee_id,
                employee_name: employee.name.clone(),
                total_price,
            });
        }
        Ok(DailySummary {
            department_id,
            date,
            shopping_list,
            employee_totals,
            total_amount,
            lunch_count,
            coffee_count,
        })
    }

    /// Builds the breakfast history for one department and date.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when the department or a referenced employee is
    /// absent.
    pub fn breakfast_history(
        &self,
        department_id: DepartmentId,
        date: NaiveDate,
    ) -> Result<BreakfastHistory, LedgerError> {
        let shopping_list = self.shopping_list(department_id, date)?;
        let mut entries = Vec::new();
        let mut total_amount = Cents::ZERO;
        for order in self.orders() {
            if order.department_id != department_id
                || order.date != date
                || order.is_cancelled
                || order.order_type() != OrderType::Breakfast
            {
                continue;
            }
            let Some(breakfast) = order.items.as_breakfast() else {
                continue;
            };
            let employee = self.employee(order.employee_id)?;
            total_amount += order.total_price;
            entries.push(BreakfastHistoryEntry {
                employee_id: order.employee_id,
                employee_name: employee.name.clone(),
                total_halves: breakfast.total_halves,
                white_halves: breakfast.white_halves,
                seeded_halves: breakfast.seeded_halves,
                toppings: breakfast.toppings.clone(),
                boiled_eggs: breakfast.boiled_eggs,
                fried_eggs: breakfast.fried_eggs,
                has_coffee: breakfast.has_coffee,
                has_lunch: breakfast.has_lunch,
                total_price: order.total_price,
                is_sponsored: order.is_sponsored(),
                sponsored_meal_type: order.sponsored_meal_type(),
            });
        }
        Ok(BreakfastHistory {
            department_id,
            date,
            entries,
            shopping_list,
            total_amount,
        })
    }
}
