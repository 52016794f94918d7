// crates/kantine-core/src/lib.rs
// ============================================================================
// Module: Kantine Core Library
// Description: Domain model and balance-ledger engine for canteen ordering.
// Purpose: Provide deterministic order pricing, balance accounting, and views.
// Dependencies: chrono, serde, serde_json, sha2, thiserror
// ============================================================================

//! ## Overview
//! Kantine Core models departments, employees, orders, and the balance ledger
//! of a canteen ordering and billing system. The engine is deterministic and
//! I/O-free: hosts supply timestamps, the store interface handles durability.
//! Invariants:
//! - All monetary arithmetic is exact integer cent arithmetic.
//! - Sponsoring transfers conserve money across affected accounts.
//! - Cancelled orders are excluded from every aggregate view.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::department::Department;
pub use crate::core::department::NewDepartment;
pub use crate::core::employee::AccountBalances;
pub use crate::core::employee::Employee;
pub use crate::core::hashing::HashDigest;
pub use crate::core::hashing::HashError;
pub use crate::core::hashing::canonical_json_bytes;
pub use crate::core::hashing::hash_bytes;
pub use crate::core::identifiers::DepartmentId;
pub use crate::core::identifiers::EmployeeId;
pub use crate::core::identifiers::MenuItemId;
pub use crate::core::identifiers::OrderId;
pub use crate::core::ledger::CancelActor;
pub use crate::core::ledger::LedgerError;
pub use crate::core::ledger::LedgerState;
pub use crate::core::ledger::LunchReprice;
pub use crate::core::ledger::NewOrder;
pub use crate::core::ledger::Sponsorship;
pub use crate::core::menu::MenuItem;
pub use crate::core::menu::PriceList;
pub use crate::core::menu::PriceListUpdate;
pub use crate::core::money::Cents;
pub use crate::core::money::MoneyError;
pub use crate::core::order::BreakfastItems;
pub use crate::core::order::MealType;
pub use crate::core::order::Order;
pub use crate::core::order::OrderItems;
pub use crate::core::order::OrderType;
pub use crate::core::summary::BreakfastHistory;
pub use crate::core::summary::BreakfastHistoryEntry;
pub use crate::core::summary::DailySummary;
pub use crate::core::summary::EmployeeDayTotal;
pub use crate::core::summary::ShoppingList;
pub use crate::interfaces::LedgerStore;
pub use crate::interfaces::MemoryLedgerStore;
pub use crate::interfaces::StoreError;
