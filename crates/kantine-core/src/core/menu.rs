// crates/kantine-core/src/core/menu.rs
// ============================================================================
// Module: Kantine Menu Model
// Description: Per-department price lists for breakfast, drinks, and sweets.
// Purpose: Provide the catalog the ledger prices orders against.
// Dependencies: chrono, serde
// ============================================================================

//! ## Overview
//! Every department carries its own price list: per-half roll prices, a
//! topping catalog, egg and coffee prices, drinks and sweets menus, and a
//! date-scoped lunch price. Lunch prices are set per date; ordering lunch on a
//! date with no price set is a ledger error, not a default.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::MenuItemId;
use crate::core::money::Cents;

// ============================================================================
// SECTION: Menu Items
// ============================================================================

/// Priced menu item in a drinks or sweets catalog.
///
/// # Invariants
/// - `price` is the positive unit price; order totals carry the sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Human-readable item name.
    pub name: String,
    /// Unit price in cents.
    pub price: Cents,
}

// ============================================================================
// SECTION: Price List
// ============================================================================

/// Full price list of a department.
///
/// # Invariants
/// - Topping names are unique within the catalog.
/// - `lunch_prices` holds at most one price per date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceList {
    /// Price per white roll half.
    pub white_roll_half: Cents,
    /// Price per seeded roll half.
    pub seeded_roll_half: Cents,
    /// Topping catalog, name to per-unit price (may be zero).
    pub toppings: BTreeMap<String, Cents>,
    /// Price per boiled egg.
    pub boiled_egg: Cents,
    /// Price per fried egg.
    pub fried_egg: Cents,
    /// Price per coffee.
    pub coffee: Cents,
    /// Drinks menu.
    pub drinks: BTreeMap<MenuItemId, MenuItem>,
    /// Sweets menu.
    pub sweets: BTreeMap<MenuItemId, MenuItem>,
    /// Lunch price by date.
    pub lunch_prices: BTreeMap<NaiveDate, Cents>,
}

impl PriceList {
    /// Returns the lunch price for a date when one has been set.
    #[must_use]
    pub fn lunch_price(&self, date: NaiveDate) -> Option<Cents> {
        self.lunch_prices.get(&date).copied()
    }

    /// Applies a partial update, leaving unset fields untouched.
    pub fn apply(&mut self, update: PriceListUpdate) {
        if let Some(price) = update.white_roll_half {
            self.white_roll_half = price;
        }
        if let Some(price) = update.seeded_roll_half {
            self.seeded_roll_half = price;
        }
        if let Some(toppings) = update.toppings {
            self.toppings = toppings;
        }
        if let Some(price) = update.boiled_egg {
            self.boiled_egg = price;
        }
        if let Some(price) = update.fried_egg {
            self.fried_egg = price;
        }
        if let Some(price) = update.coffee {
            self.coffee = price;
        }
        if let Some(drinks) = update.drinks {
            self.drinks = drinks;
        }
        if let Some(sweets) = update.sweets {
            self.sweets = sweets;
        }
    }
}

/// Partial price list update.
///
/// # Invariants
/// - `None` fields leave the current value untouched.
/// - Lunch prices are excluded; they change only via the retroactive
///   lunch-settings operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceListUpdate {
    /// Replacement price per white roll half.
    pub white_roll_half: Option<Cents>,
    /// Replacement price per seeded roll half.
    pub seeded_roll_half: Option<Cents>,
    /// Replacement topping catalog.
    pub toppings: Option<BTreeMap<String, Cents>>,
    /// Replacement price per boiled egg.
    pub boiled_egg: Option<Cents>,
    /// Replacement price per fried egg.
    pub fried_egg: Option<Cents>,
    /// Replacement price per coffee.
    pub coffee: Option<Cents>,
    /// Replacement drinks menu.
    pub drinks: Option<BTreeMap<MenuItemId, MenuItem>>,
    /// Replacement sweets menu.
    pub sweets: Option<BTreeMap<MenuItemId, MenuItem>>,
}
