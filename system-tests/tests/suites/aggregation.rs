// system-tests/tests/suites/aggregation.rs
// ============================================================================
// Module: Aggregation View Tests
// Description: Daily summary and breakfast history over real HTTP.
// Purpose: Prove procurement sums and payment views stay consistent.
// Dependencies: system-tests helpers, kantine-core
// ============================================================================

//! Aggregation coverage: shopping-list sums, per-employee totals, history
//! entries, and query validation.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use kantine_contract::OrderResponse;
use kantine_core::BreakfastHistory;
use kantine_core::Cents;
use kantine_core::DailySummary;
use reqwest::StatusCode;

use crate::helpers::client::ApiClient;
use crate::helpers::harness::spawn_memory_server;
use crate::helpers::scenarios;
use crate::helpers::scenarios::full_breakfast_order;
use crate::helpers::scenarios::test_date;
use crate::helpers::scenarios::two_colas_order;

type TestResult = Result<(), String>;

#[tokio::test]
async fn daily_summary_sums_quantities_and_money() -> TestResult {
    let handle = spawn_memory_server().await?;
    let client = ApiClient::new(handle.base_url())?;
    let fixture = scenarios::setup_department(&client, "Kitchen").await?;
    let anna = scenarios::create_employee(&fixture, "Anna").await?;
    let bernd = scenarios::create_employee(&fixture, "Bernd").await?;
    for employee in [anna, bernd] {
        let _: OrderResponse = fixture
            .employee
            .post_json(
                "/api/orders",
                &full_breakfast_order(employee, fixture.department_id, test_date()),
            )
            .await?;
    }
    let _: OrderResponse = fixture
        .employee
        .post_json("/api/orders", &two_colas_order(anna, fixture.department_id, test_date()))
        .await?;

    let summary: DailySummary = fixture
        .employee
        .get_json(&format!(
            "/api/orders/daily-summary/{}?date={}",
            fixture.department_id,
            test_date()
        ))
        .await?;
    if summary.shopping_list.total_halves != 6
        || summary.shopping_list.white_halves != 4
        || summary.shopping_list.seeded_halves != 2
        || summary.shopping_list.boiled_eggs != 2
    {
        return Err(format!("unexpected shopping list: {:?}", summary.shopping_list));
    }
    // 8.20 + 8.20 - 3.00 across two employees.
    if summary.total_amount != Cents::from_cents(1340) {
        return Err(format!("unexpected total amount: {}", summary.total_amount));
    }
    if summary.lunch_count != 2 || summary.coffee_count != 2 {
        return Err("lunch and coffee counts must cover both breakfasts".to_string());
    }
    let anna_total = summary
        .employee_totals
        .iter()
        .find(|entry| entry.employee_id == anna)
        .ok_or("summary must list anna")?;
    if anna_total.total_price != Cents::from_cents(820 - 300) {
        return Err(format!("unexpected per-employee total: {}", anna_total.total_price));
    }
    handle.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn breakfast_history_lists_breakfasts_only() -> TestResult {
    let handle = spawn_memory_server().await?;
    let client = ApiClient::new(handle.base_url())?;
    let fixture = scenarios::setup_department(&client, "Kitchen").await?;
    let anna = scenarios::create_employee(&fixture, "Anna").await?;
    let _: OrderResponse = fixture
        .employee
        .post_json("/api/orders", &full_breakfast_order(anna, fixture.department_id, test_date()))
        .await?;
    let _: OrderResponse = fixture
        .employee
        .post_json("/api/orders", &two_colas_order(anna, fixture.department_id, test_date()))
        .await?;

    let history: BreakfastHistory = fixture
        .employee
        .get_json(&format!(
            "/api/orders/breakfast-history/{}?date={}",
            fixture.department_id,
            test_date()
        ))
        .await?;
    if history.entries.len() != 1 {
        return Err(format!("history must list breakfasts only: {}", history.entries.len()));
    }
    let entry = history.entries.first().ok_or("missing history entry")?;
    if entry.employee_name != "Anna"
        || entry.total_halves != 3
        || !entry.has_coffee
        || !entry.has_lunch
    {
        return Err("history entry must mirror the order contents".to_string());
    }
    if history.total_amount != Cents::from_cents(820) {
        return Err(format!("unexpected history total: {}", history.total_amount));
    }
    handle.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn unknown_department_summary_is_not_found() -> TestResult {
    let handle = spawn_memory_server().await?;
    let client = ApiClient::new(handle.base_url())?;
    let fixture = scenarios::setup_department(&client, "Kitchen").await?;
    let (status, _) = fixture
        .employee
        .get_raw(&format!("/api/orders/daily-summary/99?date={}", test_date()))
        .await?;
    if status != StatusCode::NOT_FOUND {
        return Err(format!("unknown department summary returned {status}"));
    }
    handle.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn summary_requires_date_parameter() -> TestResult {
    let handle = spawn_memory_server().await?;
    let client = ApiClient::new(handle.base_url())?;
    let fixture = scenarios::setup_department(&client, "Kitchen").await?;
    let (status, _) = fixture
        .employee
        .get_raw(&format!("/api/orders/daily-summary/{}", fixture.department_id))
        .await?;
    if status != StatusCode::BAD_REQUEST {
        return Err(format!("missing date returned {status}"));
    }
    handle.shutdown().await;
    Ok(())
}
