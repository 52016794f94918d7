// crates/kantine-core/src/core/mod.rs
// ============================================================================
// Module: Kantine Core Domain
// Description: Domain submodules for the canteen ledger engine.
// Purpose: Group identifiers, money, menu, entities, and ledger operations.
// Dependencies: chrono, serde, thiserror
// ============================================================================

//! ## Overview
//! Domain submodules for the canteen ledger engine. The ledger itself lives in
//! [`ledger`]; the other modules define the value types it operates on.

pub mod department;
pub mod employee;
pub mod hashing;
pub mod identifiers;
pub mod ledger;
pub mod menu;
pub mod money;
pub mod order;
pub mod summary;
