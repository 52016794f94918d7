// crates/kantine-core/src/core/ledger.rs
// ============================================================================
// Module: Kantine Ledger Engine
// Description: Balance ledger over departments, employees, and orders.
// Purpose: Price orders, post balance deltas, and run sponsoring transfers.
// Dependencies: chrono, serde, thiserror
// ============================================================================

//! ## Overview
//! [`LedgerState`] is the single authoritative state of the canteen system.
//! All mutations go through its operations, which validate inputs, price
//! order contents against the department catalog, and post exact cent deltas
//! to the correct home account or guest subaccount.
//! Invariants:
//! - Cancelling an order restores every affected balance to its pre-order value.
//! - Sponsoring conserves money: the sponsor debit equals the sum of credits.
//! - Guest activity never touches home balances.
//! - The engine never reads wall-clock time; hosts supply timestamps.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::department::Department;
use crate::core::department::NewDepartment;
use crate::core::employee::AccountBalances;
use crate::core::employee::Employee;
use crate::core::identifiers::DepartmentId;
use crate::core::identifiers::EmployeeId;
use crate::core::identifiers::MenuItemId;
use crate::core::identifiers::OrderId;
use crate::core::menu::MenuItem;
use crate::core::menu::PriceList;
use crate::core::menu::PriceListUpdate;
use crate::core::money::Cents;
use crate::core::order::BreakfastItems;
use crate::core::order::MealType;
use crate::core::order::Order;
use crate::core::order::OrderItems;
use crate::core::order::OrderType;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum roll halves accepted in one breakfast order.
pub const MAX_ROLL_HALVES: u32 = 200;
/// Maximum eggs of one kind accepted in one breakfast order.
pub const MAX_EGGS: u32 = 100;
/// Maximum quantity of one menu item accepted in one drinks or sweets order.
pub const MAX_ITEM_QUANTITY: u32 = 100;
/// Maximum length of department and employee names.
pub const MAX_NAME_LENGTH: usize = 120;
/// Maximum length of order notes.
pub const MAX_NOTES_LENGTH: usize = 500;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Ledger operation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// A department with the same name already exists.
    #[error("department name already exists: {0}")]
    DepartmentExists(String),
    /// The department does not exist.
    #[error("unknown department: {0}")]
    UnknownDepartment(DepartmentId),
    /// The employee does not exist.
    #[error("unknown employee: {0}")]
    UnknownEmployee(EmployeeId),
    /// The order does not exist.
    #[error("unknown order: {0}")]
    UnknownOrder(OrderId),
    /// The order exists but belongs to a different employee.
    #[error("order {order} does not belong to employee {employee}")]
    NotOrderOwner {
        /// Order identifier.
        order: OrderId,
        /// Employee attempting the cancellation.
        employee: EmployeeId,
    },
    /// The employee has no guest subaccount in the ordering department.
    #[error("employee {employee} has no guest account in department {department}")]
    NoGuestAccount {
        /// Ordering employee.
        employee: EmployeeId,
        /// Foreign department without a guest assignment.
        department: DepartmentId,
    },
    /// A selected topping is not in the department catalog.
    #[error("unknown topping: {0}")]
    UnknownTopping(String),
    /// A selected menu item is not in the department catalog.
    #[error("unknown menu item: {0}")]
    UnknownMenuItem(MenuItemId),
    /// No lunch price has been set for the requested date.
    #[error("no lunch price set for {0}")]
    LunchPriceUnset(NaiveDate),
    /// The order was already cancelled.
    #[error("order already cancelled: {0}")]
    AlreadyCancelled(OrderId),
    /// The order carries sponsored components and cannot be cancelled.
    #[error("order is sponsored and cannot be cancelled: {0}")]
    OrderSponsored(OrderId),
    /// The meal component was already sponsored for this date.
    #[error("bereits gesponsert: {meal_type} on {date}")]
    AlreadySponsored {
        /// Sponsored date.
        date: NaiveDate,
        /// Sponsored meal component.
        meal_type: MealType,
    },
    /// No non-cancelled order carries the component on this date.
    #[error("no matching orders to sponsor for {meal_type} on {date}")]
    NothingToSponsor {
        /// Requested date.
        date: NaiveDate,
        /// Requested meal component.
        meal_type: MealType,
    },
    /// The sponsor has no qualifying order on the sponsored date.
    #[error("sponsor {0} has no qualifying order on the sponsored date")]
    SponsorNotEligible(EmployeeId),
    /// Input failed a structural validation rule.
    #[error("validation failed: {0}")]
    Validation(String),
    /// The identifier space is exhausted.
    #[error("identifier space exhausted")]
    IdentifierExhausted,
}

// ============================================================================
// SECTION: Operation Payloads
// ============================================================================

/// Payload for placing an order.
///
/// # Invariants
/// - `department_id` is the ordering department, not necessarily home.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    /// Ordering employee.
    pub employee_id: EmployeeId,
    /// Ordering department.
    pub department_id: DepartmentId,
    /// Service date.
    pub date: NaiveDate,
    /// Order contents.
    pub items: OrderItems,
    /// Optional free-form notes.
    pub notes: Option<String>,
}

/// Actor performing a cancellation.
///
/// # Invariants
/// - Employee cancellations must name the order owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelActor {
    /// The ordering employee cancels their own order.
    Employee(EmployeeId),
    /// A department admin cancels on an employee's behalf.
    Admin,
}

/// Record of one executed sponsoring transfer.
///
/// # Invariants
/// - `sponsor_additional_cost` equals the sum of credits posted to the other
///   affected employees (ledger conservation).
/// - `total_cost` includes the sponsor's own component cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sponsorship {
    /// Department the transfer ran in.
    pub department_id: DepartmentId,
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

/// Outcome of a retroactive lunch price change.
///
/// # Invariants
/// - `repriced_orders` counts only non-cancelled lunch orders of the date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunchReprice {
    /// Department the price applies to.
    pub department_id: DepartmentId,
    /// Date the price applies to.
    pub date: NaiveDate,
    /// New lunch price.
    pub lunch_price: Cents,
    /// Number of orders whose totals were adjusted.
    pub repriced_orders: u32,
}

// ============================================================================
// SECTION: Ledger State
// ============================================================================

/// Authoritative canteen ledger state.
///
/// # Invariants
/// - Identifiers are allocated 1-based and never reused.
/// - Maps are ordered so snapshots serialize deterministically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerState {
    /// Departments by identifier.
    departments: BTreeMap<DepartmentId, Department>,
    /// Employees by identifier.
    employees: BTreeMap<EmployeeId, Employee>,
    /// Orders by identifier.
    orders: BTreeMap<OrderId, Order>,
    /// Executed sponsoring transfers, append-only.
    sponsorships: Vec<Sponsorship>,
    /// Next department identifier to allocate.
    next_department_id: u64,
    /// Next employee identifier to allocate.
    next_employee_id: u64,
    /// Next order identifier to allocate.
    next_order_id: u64,
}

impl LedgerState {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_department_id: 1,
            next_employee_id: 1,
            next_order_id: 1,
            ..Self::default()
        }
    }

    /// Returns true when at least one department exists.
    #[must_use]
    pub fn is_bootstrapped(&self) -> bool {
        !self.departments.is_empty()
    }

    // ------------------------------------------------------------------
    // Departments
    // ------------------------------------------------------------------

    /// Creates a department with a unique name.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when the name is empty, too long, or taken.
    pub fn create_department(&mut self, new: NewDepartment) -> Result<&Department, LedgerError> {
        validate_name(&new.name, "department name")?;
        if self.department_by_name(&new.name).is_some() {
            return Err(LedgerError::DepartmentExists(new.name));
        }
        let id = DepartmentId::from_raw(self.next_department_id)
            .ok_or(LedgerError::IdentifierExhausted)?;
        self.next_department_id = self
            .next_department_id
            .checked_add(1)
            .ok_or(LedgerError::IdentifierExhausted)?;
        let department = Department {
            id,
            name: new.name,
            employee_password: new.employee_password,
            admin_password: new.admin_password,
            prices: new.prices,
        };
        Ok(self.departments.entry(id).or_insert(department))
    }

    /// Returns a department by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnknownDepartment`] when absent.
    pub fn department(&self, id: DepartmentId) -> Result<&Department, LedgerError> {
        self.departments.get(&id).ok_or(LedgerError::UnknownDepartment(id))
    }

    /// Returns a department by unique name.
    #[must_use]
    pub fn department_by_name(&self, name: &str) -> Option<&Department> {
        self.departments.values().find(|department| department.name == name)
    }

    /// Iterates all departments in identifier order.
    pub fn departments(&self) -> impl Iterator<Item = &Department> {
        self.departments.values()
    }

    /// Applies a partial price list update to a department.
    ///
    /// Existing orders keep their prices; only the retroactive lunch-settings
    /// operation reprices.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnknownDepartment`] when absent.
    pub fn update_prices(
        &mut self,
        id: DepartmentId,
        update: PriceListUpdate,
    ) -> Result<&PriceList, LedgerError> {
        let department =
            self.departments.get_mut(&id).ok_or(LedgerError::UnknownDepartment(id))?;
        department.prices.apply(update);
        Ok(&department.prices)
    }

    // ------------------------------------------------------------------
    // Employees
    // ------------------------------------------------------------------

    /// Creates an employee in a department.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when the department is unknown or the name is
    /// invalid.
    pub fn create_employee(
        &mut self,
        name: String,
        department_id: DepartmentId,
    ) -> Result<&Employee, LedgerError> {
        validate_name(&name, "employee name")?;
        self.department(department_id)?;
        let id =
            EmployeeId::from_raw(self.next_employee_id).ok_or(LedgerError::IdentifierExhausted)?;
        self.next_employee_id =
            self.next_employee_id.checked_add(1).ok_or(LedgerError::IdentifierExhausted)?;
        let employee = Employee {
            id,
            name,
            department_id,
            balances: AccountBalances::default(),
            subaccounts: BTreeMap::new(),
        };
        Ok(self.employees.entry(id).or_insert(employee))
    }

    /// Returns an employee by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnknownEmployee`] when absent.
    pub fn employee(&self, id: EmployeeId) -> Result<&Employee, LedgerError> {
        self.employees.get(&id).ok_or(LedgerError::UnknownEmployee(id))
    }

    /// Opens a guest subaccount for an employee in a foreign department.
    ///
    /// Opening an already-open subaccount is a no-op; the call reports whether
    /// a new subaccount was created.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when either side is unknown or the department
    /// is the employee's home.
    pub fn assign_guest(
        &mut self,
        employee_id: EmployeeId,
        department_id: DepartmentId,
    ) -> Result<bool, LedgerError> {
        self.department(department_id)?;
        let employee = self
            .employees
            .get_mut(&employee_id)
            .ok_or(LedgerError::UnknownEmployee(employee_id))?;
        if employee.department_id == department_id {
            return Err(LedgerError::Validation(
                "guest assignment must target a foreign department".to_string(),
            ));
        }
        if employee.subaccounts.contains_key(&department_id) {
            return Ok(false);
        }
        employee.subaccounts.insert(department_id, AccountBalances::default());
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Orders
    // ------------------------------------------------------------------

    /// Prices and places an order, posting the balance delta.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when references are unknown, the contents fail
    /// validation, or the employee lacks a guest subaccount in a foreign
    /// ordering department.
    pub fn place_order(
        &mut self,
        new: NewOrder,
        now: DateTime<Utc>,
    ) -> Result<&Order, LedgerError> {
        if let Some(notes) = &new.notes
            && notes.len() > MAX_NOTES_LENGTH
        {
            return Err(LedgerError::Validation("notes too long".to_string()));
        }
        let department = self.department(new.department_id)?;
        let (breakfast_cost, coffee_cost, lunch_cost, total_price) =
            price_items(&new.items, &department.prices, new.date)?;
        let employee = self
            .employees
            .get_mut(&new.employee_id)
            .ok_or(LedgerError::UnknownEmployee(new.employee_id))?;
        let account =
            employee.account_mut(new.department_id).ok_or(LedgerError::NoGuestAccount {
                employee: new.employee_id,
                department: new.department_id,
            })?;
        let id = OrderId::from_raw(self.next_order_id).ok_or(LedgerError::IdentifierExhausted)?;
        self.next_order_id =
            self.next_order_id.checked_add(1).ok_or(LedgerError::IdentifierExhausted)?;
        let order = Order {
            id,
            employee_id: new.employee_id,
            department_id: new.department_id,
            date: new.date,
            items: new.items,
            total_price,
            breakfast_cost,
            coffee_cost,
            lunch_cost,
            is_cancelled: false,
            cancelled_at: None,
            cancelled_by: None,
            cancelled_by_name: None,
            sponsored_breakfast_by: None,
            sponsored_lunch_by: None,
            notes: new.notes,
            created_at: now,
        };
        match order.order_type() {
            OrderType::Breakfast => account.breakfast += order.posting_delta(),
            OrderType::Drinks | OrderType::Sweets => {
                account.drinks_sweets += order.posting_delta();
            }
        }
        Ok(self.orders.entry(id).or_insert(order))
    }

    /// Returns an order by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnknownOrder`] when absent.
    pub fn order(&self, id: OrderId) -> Result<&Order, LedgerError> {
        self.orders.get(&id).ok_or(LedgerError::UnknownOrder(id))
    }

    /// Iterates all orders in identifier order.
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    /// Returns all orders of an employee in identifier order.
    #[must_use]
    pub fn orders_for_employee(&self, employee_id: EmployeeId) -> Vec<&Order> {
        self.orders.values().filter(|order| order.employee_id == employee_id).collect()
    }

    /// Cancels an order, restoring the posted balance exactly.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when the order is unknown, already cancelled,
    /// sponsored, or not owned by the cancelling employee.
    pub fn cancel_order(
        &mut self,
        order_id: OrderId,
        actor: &CancelActor,
        now: DateTime<Utc>,
    ) -> Result<&Order, LedgerError> {
        let order = self.orders.get(&order_id).ok_or(LedgerError::UnknownOrder(order_id))?;
        if let CancelActor::Employee(employee_id) = actor
            && *employee_id != order.employee_id
        {
            return Err(LedgerError::NotOrderOwner {
                order: order_id,
                employee: *employee_id,
            });
        }
        if order.is_cancelled {
            return Err(LedgerError::AlreadyCancelled(order_id));
        }
        if order.is_sponsored() {
            return Err(LedgerError::OrderSponsored(order_id));
        }
        let owner_id = order.employee_id;
        let department_id = order.department_id;
        let reversal = -order.posting_delta();
        let order_type = order.order_type();
        let cancelled_by_name = match actor {
            CancelActor::Employee(_) => {
                Some(self.employee(owner_id)?.name.clone())
            }
            CancelActor::Admin => Some("admin".to_string()),
        };
        let account = self
            .employees
            .get_mut(&owner_id)
            .ok_or(LedgerError::UnknownEmployee(owner_id))?
            .account_mut(department_id)
            .ok_or(LedgerError::NoGuestAccount {
                employee: owner_id,
                department: department_id,
            })?;
        match order_type {
            OrderType::Breakfast => account.breakfast += reversal,
            OrderType::Drinks | OrderType::Sweets => account.drinks_sweets += reversal,
        }
        let order = self.orders.get_mut(&order_id).ok_or(LedgerError::UnknownOrder(order_id))?;
        order.is_cancelled = true;
        order.cancelled_at = Some(now);
        order.cancelled_by = match actor {
            CancelActor::Employee(employee_id) => Some(*employee_id),
            CancelActor::Admin => None,
        };
        order.cancelled_by_name = cancelled_by_name;
        Ok(order)
    }

    // ------------------------------------------------------------------
    // Sponsoring
    // ------------------------------------------------------------------

    /// Runs a sponsoring transfer for one meal component on one date.
    ///
    /// Every other affected employee is credited their component cost on the
    /// account their order posted to; the sponsor is debited the sum on their
    /// account in the department. The transfer conserves money exactly and
    /// leaves procurement quantities untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when the component was already sponsored, no
    /// order qualifies, the sponsor did not order the component, or
    /// references are unknown.
    pub fn sponsor_meal(
        &mut self,
        department_id: DepartmentId,
        date: NaiveDate,
        meal_type: MealType,
        sponsor_employee_id: EmployeeId,
    ) -> Result<&Sponsorship, LedgerError> {
        self.department(department_id)?;
        self.employee(sponsor_employee_id)?;
        if self.sponsorships.iter().any(|record| {
            record.department_id == department_id
                && record.date == date
                && record.meal_type == meal_type
        }) {
            return Err(LedgerError::AlreadySponsored { date, meal_type });
        }
        let affected: Vec<(OrderId, EmployeeId, Cents)> = self
            .orders
            .values()
            .filter(|order| {
                order.department_id == department_id
                    && order.date == date
                    && !order.is_cancelled
                    && order.order_type() == OrderType::Breakfast
            })
            .filter_map(|order| {
                let cost = match meal_type {
                    MealType::Breakfast => order.breakfast_cost,
                    MealType::Lunch => order.lunch_cost.unwrap_or_default(),
                };
                (!cost.is_zero()).then_some((order.id, order.employee_id, cost))
            })
            .collect();
        if affected.is_empty() {
            return Err(LedgerError::NothingToSponsor { date, meal_type });
        }
        if !affected.iter().any(|(_, employee, _)| *employee == sponsor_employee_id) {
            return Err(LedgerError::SponsorNotEligible(sponsor_employee_id));
        }
        let mut total_cost = Cents::ZERO;
        let mut transfer = Cents::ZERO;
        let mut employees_seen: BTreeSet<EmployeeId> = BTreeSet::new();
        for (order_id, employee_id, cost) in &affected {
            let order =
                self.orders.get_mut(order_id).ok_or(LedgerError::UnknownOrder(*order_id))?;
            match meal_type {
                MealType::Breakfast => order.sponsored_breakfast_by = Some(sponsor_employee_id),
                MealType::Lunch => order.sponsored_lunch_by = Some(sponsor_employee_id),
            }
            total_cost += *cost;
            employees_seen.insert(*employee_id);
            if *employee_id != sponsor_employee_id {
                transfer += *cost;
                let account = self
                    .employees
                    .get_mut(employee_id)
                    .ok_or(LedgerError::UnknownEmployee(*employee_id))?
                    .account_mut(department_id)
                    .ok_or(LedgerError::NoGuestAccount {
                        employee: *employee_id,
                        department: department_id,
                    })?;
                account.breakfast += *cost;
            }
        }
        let sponsor_account = self
            .employees
            .get_mut(&sponsor_employee_id)
            .ok_or(LedgerError::UnknownEmployee(sponsor_employee_id))?
            .account_mut(department_id)
            .ok_or(LedgerError::NoGuestAccount {
                employee: sponsor_employee_id,
                department: department_id,
            })?;
        sponsor_account.breakfast -= transfer;
        let record = Sponsorship {
            department_id,
            date,
            meal_type,
            sponsor_employee_id,
            total_cost,
            sponsor_additional_cost: transfer,
            affected_employees: u32::try_from(employees_seen.len())
                .map_err(|_| LedgerError::Validation("too many affected employees".to_string()))?,
        };
        self.sponsorships.push(record);
        self.sponsorships.last().ok_or_else(|| {
            LedgerError::Validation("sponsorship record missing after insert".to_string())
        })
    }

    /// Iterates executed sponsoring transfers in execution order.
    pub fn sponsorships(&self) -> impl Iterator<Item = &Sponsorship> {
        self.sponsorships.iter()
    }

    // ------------------------------------------------------------------
    // Lunch settings
    // ------------------------------------------------------------------

    /// Sets the lunch price for a date and reprices existing orders.
    ///
    /// The price delta posts to the account that currently bears the lunch
    /// cost: the lunch sponsor's account when the component is sponsored, the
    /// ordering employee's account otherwise. Repeated updates compose.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when the department is unknown.
    pub fn set_lunch_price(
        &mut self,
        department_id: DepartmentId,
        date: NaiveDate,
        price: Cents,
    ) -> Result<LunchReprice, LedgerError> {
        let department = self
            .departments
            .get_mut(&department_id)
            .ok_or(LedgerError::UnknownDepartment(department_id))?;
        department.prices.lunch_prices.insert(date, price);
        let adjustments: Vec<(OrderId, EmployeeId, Cents)> = self
            .orders
            .values()
            .filter(|order| {
                order.department_id == department_id
                    && order.date == date
                    && !order.is_cancelled
                    && order.order_type() == OrderType::Breakfast
            })
            .filter_map(|order| {
                let old = order.lunch_cost?;
                let delta = price - old;
                let payer = order.sponsored_lunch_by.unwrap_or(order.employee_id);
                Some((order.id, payer, delta))
            })
            .collect();
        let mut repriced = 0u32;
        for (order_id, payer, delta) in adjustments {
            let order =
                self.orders.get_mut(&order_id).ok_or(LedgerError::UnknownOrder(order_id))?;
            order.total_price += delta;
            order.lunch_cost = Some(price);
            repriced = repriced.saturating_add(1);
            if delta.is_zero() {
                continue;
            }
            let account = self
                .employees
                .get_mut(&payer)
                .ok_or(LedgerError::UnknownEmployee(payer))?
                .account_mut(department_id)
                .ok_or(LedgerError::NoGuestAccount {
                    employee: payer,
                    department: department_id,
                })?;
            account.breakfast -= delta;
        }
        Ok(LunchReprice {
            department_id,
            date,
            lunch_price: price,
            repriced_orders: repriced,
        })
    }
}

// ============================================================================
// SECTION: Pricing
// ============================================================================

/// Prices order contents against a department price list.
///
/// Returns `(breakfast_cost, coffee_cost, lunch_cost, total_price)`.
fn price_items(
    items: &OrderItems,
    prices: &PriceList,
    date: NaiveDate,
) -> Result<(Cents, Cents, Option<Cents>, Cents), LedgerError> {
    match items {
        OrderItems::Breakfast(breakfast) => price_breakfast(breakfast, prices, date),
        OrderItems::Drinks(counts) => {
            let total = price_counted_items(counts, &prices.drinks)?;
            Ok((Cents::ZERO, Cents::ZERO, None, -total))
        }
        OrderItems::Sweets(counts) => {
            let total = price_counted_items(counts, &prices.sweets)?;
            Ok((Cents::ZERO, Cents::ZERO, None, -total))
        }
    }
}

/// Prices breakfast contents.
fn price_breakfast(
    items: &BreakfastItems,
    prices: &PriceList,
    date: NaiveDate,
) -> Result<(Cents, Cents, Option<Cents>, Cents), LedgerError> {
    if items.white_halves.checked_add(items.seeded_halves) != Some(items.total_halves) {
        return Err(LedgerError::Validation(
            "white and seeded halves must sum to total halves".to_string(),
        ));
    }
    if items.total_halves > MAX_ROLL_HALVES {
        return Err(LedgerError::Validation("too many roll halves".to_string()));
    }
    if items.boiled_eggs > MAX_EGGS || items.fried_eggs > MAX_EGGS {
        return Err(LedgerError::Validation("too many eggs".to_string()));
    }
    let mut breakfast_cost = prices.white_roll_half.times(items.white_halves)
        + prices.seeded_roll_half.times(items.seeded_halves)
        + prices.boiled_egg.times(items.boiled_eggs)
        + prices.fried_egg.times(items.fried_eggs);
    for topping in &items.toppings {
        let price = prices
            .toppings
            .get(topping)
            .copied()
            .ok_or_else(|| LedgerError::UnknownTopping(topping.clone()))?;
        breakfast_cost += price;
    }
    let coffee_cost = if items.has_coffee { prices.coffee } else { Cents::ZERO };
    let lunch_cost = if items.has_lunch {
        Some(prices.lunch_price(date).ok_or(LedgerError::LunchPriceUnset(date))?)
    } else {
        None
    };
    let total = breakfast_cost + coffee_cost + lunch_cost.unwrap_or_default();
    Ok((breakfast_cost, coffee_cost, lunch_cost, total))
}

/// Prices a drinks or sweets quantity map against a catalog.
fn price_counted_items(
    counts: &BTreeMap<MenuItemId, u32>,
    catalog: &BTreeMap<MenuItemId, MenuItem>,
) -> Result<Cents, LedgerError> {
    if counts.is_empty() {
        return Err(LedgerError::Validation("order contains no items".to_string()));
    }
    let mut total = Cents::ZERO;
    for (item_id, quantity) in counts {
        if *quantity == 0 {
            return Err(LedgerError::Validation("item quantity must be positive".to_string()));
        }
        if *quantity > MAX_ITEM_QUANTITY {
            return Err(LedgerError::Validation("item quantity too large".to_string()));
        }
        let item =
            catalog.get(item_id).ok_or_else(|| LedgerError::UnknownMenuItem(item_id.clone()))?;
        total += item.price.times(*quantity);
    }
    Ok(total)
}

// ============================================================================
// SECTION: Validation Helpers
// ============================================================================

/// Validates a human-readable name.
fn validate_name(name: &str, what: &str) -> Result<(), LedgerError> {
    if name.trim().is_empty() {
        return Err(LedgerError::Validation(format!("{what} must not be empty")));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(LedgerError::Validation(format!("{what} too long")));
    }
    Ok(())
}
