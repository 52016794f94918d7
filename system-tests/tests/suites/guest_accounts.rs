// system-tests/tests/suites/guest_accounts.rs
// ============================================================================
// Module: Guest Account Tests
// Description: Subaccount routing for cross-department employees.
// Purpose: Prove guest activity never touches home balances.
// Dependencies: system-tests helpers, kantine-contract
// ============================================================================

//! Guest coverage: assignment, subaccount posting, and home isolation.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use kantine_contract::BalancesResponse;
use kantine_contract::GuestAssignmentRequest;
use kantine_contract::GuestAssignmentResponse;
use kantine_contract::OrderResponse;
use kantine_core::Cents;

use crate::helpers::client::ApiClient;
use crate::helpers::harness::spawn_memory_server;
use crate::helpers::scenarios;
use crate::helpers::scenarios::full_breakfast_order;
use crate::helpers::scenarios::test_date;

type TestResult = Result<(), String>;

#[tokio::test]
async fn guest_orders_post_to_subaccount_only() -> TestResult {
    let handle = spawn_memory_server().await?;
    let client = ApiClient::new(handle.base_url())?;
    let kitchen = scenarios::setup_department(&client, "Kitchen").await?;
    let annex = scenarios::setup_department(&kitchen.admin, "Annex").await?;
    let bernd = scenarios::create_employee(&annex, "Bernd").await?;

    // Kitchen's admin opens the guest subaccount for Bernd.
    let assignment: GuestAssignmentResponse = kitchen
        .admin
        .post_json(
            &format!("/api/departments/{}/temporary-employees", kitchen.department_id),
            &GuestAssignmentRequest { employee_id: bernd },
        )
        .await?;
    if !assignment.subaccount_created {
        return Err("first assignment must open the subaccount".to_string());
    }

    // A repeated assignment is a no-op.
    let repeated: GuestAssignmentResponse = kitchen
        .admin
        .post_json(
            &format!("/api/departments/{}/temporary-employees", kitchen.department_id),
            &GuestAssignmentRequest { employee_id: bernd },
        )
        .await?;
    if repeated.subaccount_created {
        return Err("repeated assignment must not reopen the subaccount".to_string());
    }

    // Bernd orders in Kitchen through a Kitchen session.
    let order: OrderResponse = kitchen
        .employee
        .post_json("/api/orders", &full_breakfast_order(bernd, kitchen.department_id, test_date()))
        .await?;
    if order.total_price != Cents::from_cents(820) {
        return Err(format!("unexpected guest order total: {}", order.total_price));
    }

    let view: BalancesResponse =
        annex.employee.get_json(&format!("/api/employees/{bernd}/all-balances")).await?;
    if view.breakfast_balance != Cents::ZERO {
        return Err(format!("home balance touched by guest order: {}", view.breakfast_balance));
    }
    let subaccount = view
        .subaccount_balances
        .get(&kitchen.department_id)
        .ok_or("subaccount must appear in all-balances")?;
    if subaccount.breakfast_balance != Cents::from_cents(-820) {
        return Err(format!(
            "guest order must post to the subaccount: {}",
            subaccount.breakfast_balance
        ));
    }
    handle.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn guest_cancel_restores_the_subaccount() -> TestResult {
    let handle = spawn_memory_server().await?;
    let client = ApiClient::new(handle.base_url())?;
    let kitchen = scenarios::setup_department(&client, "Kitchen").await?;
    let annex = scenarios::setup_department(&kitchen.admin, "Annex").await?;
    let bernd = scenarios::create_employee(&annex, "Bernd").await?;
    let _: GuestAssignmentResponse = kitchen
        .admin
        .post_json(
            &format!("/api/departments/{}/temporary-employees", kitchen.department_id),
            &GuestAssignmentRequest { employee_id: bernd },
        )
        .await?;
    let order: OrderResponse = kitchen
        .employee
        .post_json("/api/orders", &full_breakfast_order(bernd, kitchen.department_id, test_date()))
        .await?;

    let _: OrderResponse = kitchen
        .employee
        .delete_json(&format!("/api/employee/{bernd}/orders/{}", order.id))
        .await?;
    let view: BalancesResponse =
        annex.employee.get_json(&format!("/api/employees/{bernd}/all-balances")).await?;
    let subaccount = view
        .subaccount_balances
        .get(&kitchen.department_id)
        .ok_or("subaccount must survive cancellation")?;
    if subaccount.breakfast_balance != Cents::ZERO {
        return Err(format!(
            "cancel must restore the subaccount: {}",
            subaccount.breakfast_balance
        ));
    }
    handle.shutdown().await;
    Ok(())
}
