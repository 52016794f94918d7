// system-tests/tests/suites/sponsoring.rs
// ============================================================================
// Module: Sponsoring Tests
// Description: Meal sponsoring transfers over real HTTP.
// Purpose: Prove ledger conservation and attribution-only semantics.
// Dependencies: system-tests helpers, kantine-contract
// ============================================================================

//! Sponsoring coverage: conservation, the breakfast+lunch scenario, double
//! sponsoring rejection, and shopping-list invariance.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use kantine_contract::BalancesResponse;
use kantine_contract::OrderResponse;
use kantine_contract::ProfileResponse;
use kantine_contract::SponsorMealRequest;
use kantine_contract::SponsorMealResponse;
use kantine_core::Cents;
use kantine_core::DailySummary;
use kantine_core::EmployeeId;
use kantine_core::MealType;
use reqwest::StatusCode;

use crate::helpers::client::ApiClient;
use crate::helpers::harness::spawn_memory_server;
use crate::helpers::scenarios;
use crate::helpers::scenarios::DepartmentFixture;
use crate::helpers::scenarios::full_breakfast_order;
use crate::helpers::scenarios::test_date;

type TestResult = Result<(), String>;

/// Breakfast balance of one employee via the balances endpoint.
async fn breakfast_balance(
    fixture: &DepartmentFixture,
    employee: EmployeeId,
) -> Result<Cents, String> {
    let view: BalancesResponse =
        fixture.employee.get_json(&format!("/api/employees/{employee}/all-balances")).await?;
    Ok(view.breakfast_balance)
}

/// Places the standard full breakfast for each listed employee.
async fn place_breakfasts(
    fixture: &DepartmentFixture,
    employees: &[EmployeeId],
) -> Result<(), String> {
    for employee in employees {
        let _: OrderResponse = fixture
            .employee
            .post_json(
                "/api/orders",
                &full_breakfast_order(*employee, fixture.department_id, test_date()),
            )
            .await?;
    }
    Ok(())
}

/// Sponsors one meal component through the admin session.
async fn sponsor(
    fixture: &DepartmentFixture,
    meal_type: MealType,
    sponsor_employee_id: EmployeeId,
) -> Result<SponsorMealResponse, String> {
    fixture
        .admin
        .post_json(
            "/api/department-admin/sponsor-meal",
            &SponsorMealRequest {
                date: test_date(),
                meal_type,
                sponsor_employee_id,
            },
        )
        .await
}

#[tokio::test]
async fn sponsoring_conserves_total_money() -> TestResult {
    let handle = spawn_memory_server().await?;
    let client = ApiClient::new(handle.base_url())?;
    let fixture = scenarios::setup_department(&client, "Kitchen").await?;
    let anna = scenarios::create_employee(&fixture, "Anna").await?;
    let bernd = scenarios::create_employee(&fixture, "Bernd").await?;
    let clara = scenarios::create_employee(&fixture, "Clara").await?;
    place_breakfasts(&fixture, &[anna, bernd, clara]).await?;

    let mut before = Cents::ZERO;
    for employee in [anna, bernd, clara] {
        before += breakfast_balance(&fixture, employee).await?;
    }

    let outcome = sponsor(&fixture, MealType::Breakfast, anna).await?;
    if outcome.total_cost != Cents::from_cents(510) {
        return Err(format!("unexpected total cost: {}", outcome.total_cost));
    }
    if outcome.sponsor_additional_cost != Cents::from_cents(340) {
        return Err(format!("unexpected sponsor cost: {}", outcome.sponsor_additional_cost));
    }
    if outcome.affected_employees != 3 {
        return Err(format!("unexpected affected count: {}", outcome.affected_employees));
    }

    let mut after = Cents::ZERO;
    for employee in [anna, bernd, clara] {
        after += breakfast_balance(&fixture, employee).await?;
    }
    if before != after {
        return Err(format!("sponsoring moved total money: {before} -> {after}"));
    }
    if breakfast_balance(&fixture, bernd).await? != Cents::from_cents(-820 + 170) {
        return Err("co-worker must be credited the breakfast component".to_string());
    }
    if breakfast_balance(&fixture, anna).await? != Cents::from_cents(-820 - 340) {
        return Err("sponsor must absorb the others' breakfast components".to_string());
    }
    handle.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn sponsored_breakfast_and_lunch_leave_only_coffee() -> TestResult {
    let handle = spawn_memory_server().await?;
    let client = ApiClient::new(handle.base_url())?;
    let fixture = scenarios::setup_department(&client, "Kitchen").await?;
    let anna = scenarios::create_employee(&fixture, "Anna").await?;
    let bernd = scenarios::create_employee(&fixture, "Bernd").await?;
    let clara = scenarios::create_employee(&fixture, "Clara").await?;
    place_breakfasts(&fixture, &[anna, bernd, clara]).await?;

    sponsor(&fixture, MealType::Breakfast, bernd).await?;
    sponsor(&fixture, MealType::Lunch, clara).await?;

    // Anna keeps exactly her coffee: 8.20 - 1.70 breakfast - 5.00 lunch.
    if breakfast_balance(&fixture, anna).await? != Cents::from_cents(-150) {
        return Err("only the coffee cost may remain".to_string());
    }
    let profile: ProfileResponse =
        fixture.employee.get_json(&format!("/api/employees/{anna}/profile")).await?;
    let order = profile.orders.first().ok_or("profile must list the order")?;
    if order.sponsored_meal_type != "breakfast,lunch" {
        return Err(format!("unexpected sponsored label: {}", order.sponsored_meal_type));
    }
    if !order.is_sponsored {
        return Err("order must be flagged sponsored".to_string());
    }
    handle.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn double_sponsoring_is_rejected_with_german_message() -> TestResult {
    let handle = spawn_memory_server().await?;
    let client = ApiClient::new(handle.base_url())?;
    let fixture = scenarios::setup_department(&client, "Kitchen").await?;
    let anna = scenarios::create_employee(&fixture, "Anna").await?;
    let bernd = scenarios::create_employee(&fixture, "Bernd").await?;
    place_breakfasts(&fixture, &[anna, bernd]).await?;

    sponsor(&fixture, MealType::Lunch, anna).await?;
    let (status, body) = fixture
        .admin
        .post_raw(
            "/api/department-admin/sponsor-meal",
            &SponsorMealRequest {
                date: test_date(),
                meal_type: MealType::Lunch,
                sponsor_employee_id: bernd,
            },
        )
        .await?;
    if status != StatusCode::BAD_REQUEST {
        return Err(format!("double sponsoring returned {status}"));
    }
    let message = body["error"]["message"].as_str().unwrap_or_default();
    if !message.contains("bereits gesponsert") {
        return Err(format!("message must contain 'bereits gesponsert': {message}"));
    }
    handle.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn sponsoring_leaves_shopping_list_unchanged() -> TestResult {
    let handle = spawn_memory_server().await?;
    let client = ApiClient::new(handle.base_url())?;
    let fixture = scenarios::setup_department(&client, "Kitchen").await?;
    let anna = scenarios::create_employee(&fixture, "Anna").await?;
    let bernd = scenarios::create_employee(&fixture, "Bernd").await?;
    place_breakfasts(&fixture, &[anna, bernd]).await?;

    let path = format!(
        "/api/orders/daily-summary/{}?date={}",
        fixture.department_id,
        test_date()
    );
    let before: DailySummary = fixture.employee.get_json(&path).await?;
    sponsor(&fixture, MealType::Breakfast, anna).await?;
    let after: DailySummary = fixture.employee.get_json(&path).await?;
    if before.shopping_list != after.shopping_list {
        return Err("sponsoring must not change procurement quantities".to_string());
    }
    handle.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn sponsored_orders_cannot_be_cancelled() -> TestResult {
    let handle = spawn_memory_server().await?;
    let client = ApiClient::new(handle.base_url())?;
    let fixture = scenarios::setup_department(&client, "Kitchen").await?;
    let anna = scenarios::create_employee(&fixture, "Anna").await?;
    let bernd = scenarios::create_employee(&fixture, "Bernd").await?;

    let order: OrderResponse = fixture
        .employee
        .post_json("/api/orders", &full_breakfast_order(anna, fixture.department_id, test_date()))
        .await?;
    place_breakfasts(&fixture, &[bernd]).await?;
    sponsor(&fixture, MealType::Breakfast, bernd).await?;

    let (status, _) = fixture
        .employee
        .delete_raw(&format!("/api/employee/{anna}/orders/{}", order.id))
        .await?;
    if status != StatusCode::BAD_REQUEST {
        return Err(format!("cancelling a sponsored order returned {status}"));
    }
    handle.shutdown().await;
    Ok(())
}
