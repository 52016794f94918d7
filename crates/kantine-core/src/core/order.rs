// crates/kantine-core/src/core/order.rs
// ============================================================================
// Module: Kantine Order Model
// Description: Breakfast, drinks, and sweets purchase events.
// Purpose: Capture order contents, pricing breakdown, and lifecycle flags.
// Dependencies: chrono, serde
// ============================================================================

//! ## Overview
//! Orders are created once and soft-deleted via cancellation. Breakfast
//! orders carry a component breakdown (rolls+toppings+eggs, coffee, lunch) so
//! that sponsoring and retroactive lunch repricing can move exactly one
//! component without recomputing the rest. Drinks and sweets orders store a
//! negative `total_price`; breakfast orders a positive one.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::DepartmentId;
use crate::core::identifiers::EmployeeId;
use crate::core::identifiers::MenuItemId;
use crate::core::identifiers::OrderId;
use crate::core::money::Cents;

// ============================================================================
// SECTION: Order Kinds
// ============================================================================

/// Order type discriminator.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Breakfast order (rolls, toppings, eggs, coffee, lunch flag).
    Breakfast,
    /// Drinks order.
    Drinks,
    /// Sweets order.
    Sweets,
}

impl OrderType {
    /// Returns the stable wire label for the order type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Drinks => "drinks",
            Self::Sweets => "sweets",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sponsorable meal component.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Rolls, toppings, and eggs of a breakfast order.
    Breakfast,
    /// The lunch component of a breakfast order.
    Lunch,
}

impl MealType {
    /// Returns the stable wire label for the meal type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Order Contents
// ============================================================================

/// Breakfast order contents.
///
/// # Invariants
/// - `white_halves + seeded_halves == total_halves`.
/// - Topping names must exist in the department catalog at order time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakfastItems {
    /// Total roll halves ordered.
    pub total_halves: u32,
    /// White roll halves.
    pub white_halves: u32,
    /// Seeded roll halves.
    pub seeded_halves: u32,
    /// Selected toppings by catalog name.
    pub toppings: Vec<String>,
    /// Boiled egg count.
    pub boiled_eggs: u32,
    /// Fried egg count.
    pub fried_eggs: u32,
    /// Whether the order includes a coffee.
    pub has_coffee: bool,
    /// Whether the order includes the day's lunch.
    pub has_lunch: bool,
}

/// Order contents by type.
///
/// # Invariants
/// - The variant matches the order's [`OrderType`] exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "order_type", content = "items", rename_all = "snake_case")]
pub enum OrderItems {
    /// Breakfast contents.
    Breakfast(BreakfastItems),
    /// Drink quantities by menu item.
    Drinks(BTreeMap<MenuItemId, u32>),
    /// Sweet quantities by menu item.
    Sweets(BTreeMap<MenuItemId, u32>),
}

impl OrderItems {
    /// Returns the order type for these contents.
    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        match self {
            Self::Breakfast(_) => OrderType::Breakfast,
            Self::Drinks(_) => OrderType::Drinks,
            Self::Sweets(_) => OrderType::Sweets,
        }
    }

    /// Returns the breakfast contents when this is a breakfast order.
    #[must_use]
    pub const fn as_breakfast(&self) -> Option<&BreakfastItems> {
        match self {
            Self::Breakfast(items) => Some(items),
            Self::Drinks(_) | Self::Sweets(_) => None,
        }
    }
}

// ============================================================================
// SECTION: Order
// ============================================================================

/// Purchase event with pricing breakdown and lifecycle flags.
///
/// # Invariants
/// - For breakfast orders, `total_price == breakfast_cost + coffee_cost +
///   lunch_cost.unwrap_or_default()` and is non-negative.
/// - For drinks and sweets orders, `total_price` is non-positive and the
///   component costs are zero.
/// - `lunch_cost` is `Some` exactly when the breakfast contents set
///   `has_lunch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order identifier.
    pub id: OrderId,
    /// Ordering employee.
    pub employee_id: EmployeeId,
    /// Department the order was placed in (may differ from home for guests).
    pub department_id: DepartmentId,
    /// Service date of the order.
    pub date: NaiveDate,
    /// Order contents.
    pub items: OrderItems,
    /// Signed order total; see type invariants for the sign convention.
    pub total_price: Cents,
    /// Rolls + toppings + eggs component (breakfast orders only).
    pub breakfast_cost: Cents,
    /// Coffee component (breakfast orders only).
    pub coffee_cost: Cents,
    /// Lunch component at the currently applied lunch price.
    pub lunch_cost: Option<Cents>,
    /// Whether the order has been cancelled (soft delete).
    pub is_cancelled: bool,
    /// Cancellation time when cancelled.
    pub cancelled_at: Option<DateTime<Utc>>,
    /// Cancelling employee; `None` when an admin cancelled.
    pub cancelled_by: Option<EmployeeId>,
    /// Display name of the cancelling actor.
    pub cancelled_by_name: Option<String>,
    /// Sponsor of the breakfast component, once sponsored.
    pub sponsored_breakfast_by: Option<EmployeeId>,
    /// Sponsor of the lunch component, once sponsored.
    pub sponsored_lunch_by: Option<EmployeeId>,
    /// Free-form order notes.
    pub notes: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Returns the order type.
    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        self.items.order_type()
    }

    /// Returns true when any component of the order is sponsored.
    #[must_use]
    pub const fn is_sponsored(&self) -> bool {
        self.sponsored_breakfast_by.is_some() || self.sponsored_lunch_by.is_some()
    }

    /// Returns the sponsored meal types as the stable comma-joined wire label.
    ///
    /// Breakfast sorts before lunch; an unsponsored order yields an empty
    /// string.
    #[must_use]
    pub fn sponsored_meal_type(&self) -> String {
        let mut parts = Vec::new();
        if self.sponsored_breakfast_by.is_some() {
            parts.push(MealType::Breakfast.as_str());
        }
        if self.sponsored_lunch_by.is_some() {
            parts.push(MealType::Lunch.as_str());
        }
        parts.join(",")
    }

    /// Returns the balance delta applied to the posting account at placement.
    ///
    /// Breakfast totals are positive and increase debt; drinks and sweets
    /// totals are already negative. Either way the posting delta is the
    /// non-positive value that placement adds and cancellation removes.
    #[must_use]
    pub fn posting_delta(&self) -> Cents {
        match self.order_type() {
            OrderType::Breakfast => -self.total_price,
            OrderType::Drinks | OrderType::Sweets => self.total_price,
        }
    }
}
