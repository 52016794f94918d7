// system-tests/tests/suites/cancellation.rs
// ============================================================================
// Module: Cancellation Tests
// Description: Soft-delete semantics and exact balance restoration.
// Purpose: Prove cancellation reverses postings without double application.
// Dependencies: system-tests helpers, kantine-contract
// ============================================================================

//! Cancellation coverage: self and admin cancels, exact restoration,
//! repeated-cancel rejection, and ownership checks.

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
use kantine_core::Cents;
use reqwest::StatusCode;

use crate::helpers::client::ApiClient;
use crate::helpers::harness::spawn_memory_server;
use crate::helpers::scenarios;
use crate::helpers::scenarios::full_breakfast_order;
use crate::helpers::scenarios::test_date;

type TestResult = Result<(), String>;

#[tokio::test]
async fn self_cancel_restores_balance_exactly() -> TestResult {
    let handle = spawn_memory_server().await?;
    let client = ApiClient::new(handle.base_url())?;
    let fixture = scenarios::setup_department(&client, "Kitchen").await?;
    let anna = scenarios::create_employee(&fixture, "Anna").await?;

    let order: OrderResponse = fixture
        .employee
        .post_json("/api/orders", &full_breakfast_order(anna, fixture.department_id, test_date()))
        .await?;
    let charged: BalancesResponse =
        fixture.employee.get_json(&format!("/api/employees/{anna}/all-balances")).await?;
    if charged.breakfast_balance != Cents::from_cents(-820) {
        return Err(format!("unexpected charged balance: {}", charged.breakfast_balance));
    }

    let cancelled: OrderResponse = fixture
        .employee
        .delete_json(&format!("/api/employee/{anna}/orders/{}", order.id))
        .await?;
    if !cancelled.is_cancelled {
        return Err("cancelled order must carry is_cancelled".to_string());
    }
    if cancelled.cancelled_by_name.as_deref() != Some("Anna") {
        return Err(format!("unexpected canceller: {:?}", cancelled.cancelled_by_name));
    }
    if cancelled.cancelled_at.is_none() {
        return Err("cancellation must record a timestamp".to_string());
    }

    let restored: BalancesResponse =
        fixture.employee.get_json(&format!("/api/employees/{anna}/all-balances")).await?;
    if restored.breakfast_balance != Cents::ZERO {
        return Err(format!("balance not restored: {}", restored.breakfast_balance));
    }
    handle.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn cancelling_twice_is_rejected() -> TestResult {
    let handle = spawn_memory_server().await?;
    let client = ApiClient::new(handle.base_url())?;
    let fixture = scenarios::setup_department(&client, "Kitchen").await?;
    let anna = scenarios::create_employee(&fixture, "Anna").await?;

    let order: OrderResponse = fixture
        .employee
        .post_json("/api/orders", &full_breakfast_order(anna, fixture.department_id, test_date()))
        .await?;
    let path = format!("/api/employee/{anna}/orders/{}", order.id);
    let _: OrderResponse = fixture.employee.delete_json(&path).await?;
    let (status, _) = fixture.employee.delete_raw(&path).await?;
    if status != StatusCode::BAD_REQUEST {
        return Err(format!("second cancel returned {status}"));
    }

    // The single reversal stands; no double credit.
    let view: BalancesResponse =
        fixture.employee.get_json(&format!("/api/employees/{anna}/all-balances")).await?;
    if view.breakfast_balance != Cents::ZERO {
        return Err(format!("double cancel moved the balance: {}", view.breakfast_balance));
    }
    handle.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn admin_cancel_works_without_owner_session() -> TestResult {
    let handle = spawn_memory_server().await?;
    let client = ApiClient::new(handle.base_url())?;
    let fixture = scenarios::setup_department(&client, "Kitchen").await?;
    let anna = scenarios::create_employee(&fixture, "Anna").await?;

    let order: OrderResponse = fixture
        .employee
        .post_json("/api/orders", &full_breakfast_order(anna, fixture.department_id, test_date()))
        .await?;
    let cancelled: OrderResponse =
        fixture.admin.delete_json(&format!("/api/department-admin/orders/{}", order.id)).await?;
    if cancelled.cancelled_by.is_some() {
        return Err("admin cancellation must not attribute an employee".to_string());
    }
    if cancelled.cancelled_by_name.as_deref() != Some("admin") {
        return Err(format!("unexpected canceller name: {:?}", cancelled.cancelled_by_name));
    }
    handle.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn cancel_by_non_owner_is_not_found() -> TestResult {
    let handle = spawn_memory_server().await?;
    let client = ApiClient::new(handle.base_url())?;
    let fixture = scenarios::setup_department(&client, "Kitchen").await?;
    let anna = scenarios::create_employee(&fixture, "Anna").await?;
    let bernd = scenarios::create_employee(&fixture, "Bernd").await?;

    let order: OrderResponse = fixture
        .employee
        .post_json("/api/orders", &full_breakfast_order(anna, fixture.department_id, test_date()))
        .await?;
    let (status, _) = fixture
        .employee
        .delete_raw(&format!("/api/employee/{bernd}/orders/{}", order.id))
        .await?;
    if status != StatusCode::NOT_FOUND {
        return Err(format!("non-owner cancel returned {status}"));
    }
    handle.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn cancelling_unknown_order_is_not_found() -> TestResult {
    let handle = spawn_memory_server().await?;
    let client = ApiClient::new(handle.base_url())?;
    let fixture = scenarios::setup_department(&client, "Kitchen").await?;
    let anna = scenarios::create_employee(&fixture, "Anna").await?;
    let (status, _) =
        fixture.employee.delete_raw(&format!("/api/employee/{anna}/orders/4242")).await?;
    if status != StatusCode::NOT_FOUND {
        return Err(format!("unknown order cancel returned {status}"));
    }
    handle.shutdown().await;
    Ok(())
}
