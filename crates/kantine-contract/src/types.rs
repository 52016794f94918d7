// crates/kantine-contract/src/types.rs
// ============================================================================
// Module: Contract Types
// Description: Request and response bodies for the Kantine HTTP API.
// Purpose: Provide canonical wire shapes shared by server and clients.
// Dependencies: chrono, kantine-core, serde
// ============================================================================

//! ## Overview
//! Wire shapes for every endpoint. Field names follow the observed API
//! contract: balances appear as `breakfast_balance`/`drinks_sweets_balance`,
//! order totals as `total_price`, sponsored components as the comma-joined
//! `sponsored_meal_type` label. Aggregation views (`daily_summary`,
//! `breakfast_history`, `shopping_list`) reuse the core view types, which
//! already serialize in wire form.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use kantine_core::BreakfastItems;
use kantine_core::Cents;
use kantine_core::Department;
use kantine_core::DepartmentId;
use kantine_core::Employee;
use kantine_core::EmployeeId;
use kantine_core::LunchReprice;
use kantine_core::MealType;
use kantine_core::MenuItemId;
use kantine_core::Order;
use kantine_core::OrderId;
use kantine_core::OrderItems;
use kantine_core::OrderType;
use kantine_core::PriceList;
use kantine_core::Sponsorship;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Session Types
// ============================================================================

/// Role attached to a session token.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionRole {
    /// Department employee login.
    Employee,
    /// Department admin login.
    Admin,
}

/// Login request for both employee and admin logins.
///
/// # Invariants
/// - `department_name` matches a department exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Department name.
    pub department_name: String,
    /// Employee or admin password depending on the endpoint.
    pub password: String,
}

/// Login response carrying the session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Department the session is scoped to.
    pub department_id: DepartmentId,
    /// Granted role.
    pub role: SessionRole,
    /// Opaque bearer token for subsequent requests.
    pub access_token: String,
}

// ============================================================================
// SECTION: Department Types
// ============================================================================

/// Department creation request.
///
/// # Invariants
/// - Allowed without a session only while no department exists (bootstrap).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDepartmentRequest {
    /// Unique department name.
    pub name: String,
    /// Password for employee logins.
    pub employee_password: String,
    /// Password for admin logins.
    pub admin_password: String,
    /// Initial price list.
    pub prices: PriceList,
}

/// Department response without credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentResponse {
    /// Department identifier.
    pub id: DepartmentId,
    /// Department name.
    pub name: String,
}

impl From<&Department> for DepartmentResponse {
    fn from(department: &Department) -> Self {
        Self {
            id: department.id,
            name: department.name.clone(),
        }
    }
}

// ============================================================================
// SECTION: Employee Types
// ============================================================================

/// Employee creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEmployeeRequest {
    /// Employee display name.
    pub name: String,
    /// Home department.
    pub department_id: DepartmentId,
}

/// Employee with home balances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeResponse {
    /// Employee identifier.
    pub id: EmployeeId,
    /// Employee display name.
    pub name: String,
    /// Home department.
    pub department_id: DepartmentId,
    /// Home breakfast balance (negative is debt).
    pub breakfast_balance: Cents,
    /// Home drinks/sweets balance (negative is debt).
    pub drinks_sweets_balance: Cents,
}

impl From<&Employee> for EmployeeResponse {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name.clone(),
            department_id: employee.department_id,
            breakfast_balance: employee.balances.breakfast,
            drinks_sweets_balance: employee.balances.drinks_sweets,
        }
    }
}

/// Balance pair of one guest subaccount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubaccountBalances {
    /// Subaccount breakfast balance.
    pub breakfast_balance: Cents,
    /// Subaccount drinks/sweets balance.
    pub drinks_sweets_balance: Cents,
}

/// Home balances plus all guest subaccounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancesResponse {
    /// Employee identifier.
    pub employee_id: EmployeeId,
    /// Employee display name.
    pub name: String,
    /// Home department.
    pub department_id: DepartmentId,
    /// Home breakfast balance.
    pub breakfast_balance: Cents,
    /// Home drinks/sweets balance.
    pub drinks_sweets_balance: Cents,
    /// Guest subaccount balances keyed by guest department identifier.
    pub subaccount_balances: BTreeMap<DepartmentId, SubaccountBalances>,
}

impl From<&Employee> for BalancesResponse {
    fn from(employee: &Employee) -> Self {
        let subaccount_balances = employee
            .subaccounts
            .iter()
            .map(|(department_id, balances)| {
                (
                    *department_id,
                    SubaccountBalances {
                        breakfast_balance: balances.breakfast,
                        drinks_sweets_balance: balances.drinks_sweets,
                    },
                )
            })
            .collect();
        Self {
            employee_id: employee.id,
            name: employee.name.clone(),
            department_id: employee.department_id,
            breakfast_balance: employee.balances.breakfast,
            drinks_sweets_balance: employee.balances.drinks_sweets,
            subaccount_balances,
        }
    }
}

/// Employee profile: home balances plus full order history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileResponse {
    /// Employee with home balances.
    pub employee: EmployeeResponse,
    /// All orders of the employee, oldest first.
    pub orders: Vec<OrderResponse>,
}

/// Guest assignment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestAssignmentRequest {
    /// Employee to assign as a guest.
    pub employee_id: EmployeeId,
}

/// Guest assignment response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestAssignmentResponse {
    /// Assigned employee.
    pub employee_id: EmployeeId,
    /// Guest department.
    pub department_id: DepartmentId,
    /// True when the subaccount was newly opened.
    pub subaccount_created: bool,
}

// ============================================================================
// SECTION: Order Types
// ============================================================================

/// Order placement request.
///
/// # Invariants
/// - Exactly the item field matching `order_type` must be set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    /// Ordering employee.
    pub employee_id: EmployeeId,
    /// Ordering department (home or guest).
    pub department_id: DepartmentId,
    /// Service date.
    pub date: NaiveDate,
    /// Order type discriminator.
    pub order_type: OrderType,
    /// Breakfast contents when `order_type` is breakfast.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakfast_items: Option<BreakfastItems>,
    /// Drink quantities when `order_type` is drinks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drink_items: Option<BTreeMap<MenuItemId, u32>>,
    /// Sweet quantities when `order_type` is sweets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweet_items: Option<BTreeMap<MenuItemId, u32>>,
    /// Optional free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Order as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResponse {
    /// Order identifier.
    pub id: OrderId,
    /// Ordering employee.
    pub employee_id: EmployeeId,
    /// Ordering department.
    pub department_id: DepartmentId,
    /// Service date.
    pub date: NaiveDate,
    /// Order type discriminator.
    pub order_type: OrderType,
    /// Breakfast contents for breakfast orders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakfast_items: Option<BreakfastItems>,
    /// Drink quantities for drinks orders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drink_items: Option<BTreeMap<MenuItemId, u32>>,
    /// Sweet quantities for sweets orders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweet_items: Option<BTreeMap<MenuItemId, u32>>,
    /// Signed order total (positive breakfast, negative drinks/sweets).
    pub total_price: Cents,
    /// Whether the order was cancelled.
    pub is_cancelled: bool,
    /// Cancellation time when cancelled.
    pub cancelled_at: Option<DateTime<Utc>>,
    /// Cancelling employee when an employee cancelled.
    pub cancelled_by: Option<EmployeeId>,
    /// Display name of the cancelling actor.
    pub cancelled_by_name: Option<String>,
    /// Whether any component is sponsored.
    pub is_sponsored: bool,
    /// Comma-joined sponsored components, breakfast first.
    pub sponsored_meal_type: String,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        let (breakfast_items, drink_items, sweet_items) = match &order.items {
            OrderItems::Breakfast(items) => (Some(items.clone()), None, None),
            OrderItems::Drinks(counts) => (None, Some(counts.clone()), None),
            OrderItems::Sweets(counts) => (None, None, Some(counts.clone())),
        };
        Self {
            id: order.id,
            employee_id: order.employee_id,
            department_id: order.department_id,
            date: order.date,
            order_type: order.order_type(),
            breakfast_items,
            drink_items,
            sweet_items,
            total_price: order.total_price,
            is_cancelled: order.is_cancelled,
            cancelled_at: order.cancelled_at,
            cancelled_by: order.cancelled_by,
            cancelled_by_name: order.cancelled_by_name.clone(),
            is_sponsored: order.is_sponsored(),
            sponsored_meal_type: order.sponsored_meal_type(),
            notes: order.notes.clone(),
            created_at: order.created_at,
        }
    }
}

// ============================================================================
// SECTION: Sponsoring Types
// ============================================================================

/// Sponsor-meal request; the department comes from the admin session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SponsorMealRequest {
    /// Sponsored date.
    pub date: NaiveDate,
    /// Sponsored meal component.
    pub meal_type: MealType,
    /// Sponsoring employee.
    pub sponsor_employee_id: EmployeeId,
}

/// Sponsor-meal response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SponsorMealResponse {
    /// Sponsored date.
    pub date: NaiveDate,
    /// Sponsored meal component.
    pub meal_type: MealType,
    /// Sponsoring employee.
    pub sponsor_employee_id: EmployeeId,
    /// Aggregated component cost across all affected orders.
    pub total_cost: Cents,
    /// Amount debited from the sponsor.
    pub sponsor_additional_cost: Cents,
    /// Distinct employees whose orders were marked sponsored.
    pub affected_employees: u32,
}

impl From<&Sponsorship> for SponsorMealResponse {
    fn from(record: &Sponsorship) -> Self {
        Self {
            date: record.date,
            meal_type: record.meal_type,
            sponsor_employee_id: record.sponsor_employee_id,
            total_cost: record.total_cost,
            sponsor_additional_cost: record.sponsor_additional_cost,
            affected_employees: record.affected_employees,
        }
    }
}

// ============================================================================
// SECTION: Lunch Settings Types
// ============================================================================

/// Retroactive lunch price request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LunchSettingsRequest {
    /// Department the price applies to.
    pub department_id: DepartmentId,
    /// Date the price applies to.
    pub date: NaiveDate,
    /// New lunch price.
    pub lunch_price: Cents,
}

/// Retroactive lunch price response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LunchSettingsResponse {
    /// Department the price applies to.
    pub department_id: DepartmentId,
    /// Date the price applies to.
    pub date: NaiveDate,
    /// New lunch price.
    pub lunch_price: Cents,
    /// Number of existing orders whose totals were adjusted.
    pub repriced_orders: u32,
}

impl From<&LunchReprice> for LunchSettingsResponse {
    fn from(outcome: &LunchReprice) -> Self {
        Self {
            department_id: outcome.department_id,
            date: outcome.date,
            lunch_price: outcome.lunch_price,
            repriced_orders: outcome.repriced_orders,
        }
    }
}

// ============================================================================
// SECTION: Health Types
// ============================================================================

/// Liveness response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Fixed status string, `ok`.
    pub status: String,
}

impl HealthResponse {
    /// Builds the canonical healthy response.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
