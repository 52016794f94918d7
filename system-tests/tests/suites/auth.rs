// system-tests/tests/suites/auth.rs
// ============================================================================
// Module: Auth Matrix Tests
// Description: Session scoping and role checks over real HTTP.
// Purpose: Prove admin endpoints reject employee and cross-department tokens.
// Dependencies: system-tests helpers, kantine-contract
// ============================================================================

//! Auth coverage: missing tokens, role enforcement, department scoping.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use kantine_contract::CreateDepartmentRequest;
use kantine_contract::GuestAssignmentRequest;
use kantine_contract::LunchSettingsRequest;
use kantine_contract::SponsorMealRequest;
use kantine_core::Cents;
use kantine_core::MealType;
use reqwest::StatusCode;

use crate::helpers::client::ApiClient;
use crate::helpers::harness::spawn_memory_server;
use crate::helpers::scenarios;
use crate::helpers::scenarios::test_date;

type TestResult = Result<(), String>;

/// Asserts a raw response status, labeling the failing operation.
fn expect_status(label: &str, status: StatusCode, expected: StatusCode) -> TestResult {
    if status == expected {
        Ok(())
    } else {
        Err(format!("{label} returned {status}, expected {expected}"))
    }
}

#[tokio::test]
async fn missing_token_is_unauthorized() -> TestResult {
    let handle = spawn_memory_server().await?;
    let client = ApiClient::new(handle.base_url())?;
    scenarios::setup_department(&client, "Kitchen").await?;
    let (status, _) = client.get_raw("/api/employees/1/profile").await?;
    expect_status("profile without token", status, StatusCode::UNAUTHORIZED)?;
    handle.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn employee_token_cannot_use_admin_endpoints() -> TestResult {
    let handle = spawn_memory_server().await?;
    let client = ApiClient::new(handle.base_url())?;
    let fixture = scenarios::setup_department(&client, "Kitchen").await?;
    let anna = scenarios::create_employee(&fixture, "Anna").await?;

    let (status, _) = fixture
        .employee
        .post_raw(
            "/api/department-admin/sponsor-meal",
            &SponsorMealRequest {
                date: test_date(),
                meal_type: MealType::Breakfast,
                sponsor_employee_id: anna,
            },
        )
        .await?;
    expect_status("sponsor-meal as employee", status, StatusCode::UNAUTHORIZED)?;

    let (status, _) = fixture
        .employee
        .put_raw(
            "/api/lunch-settings",
            &LunchSettingsRequest {
                department_id: fixture.department_id,
                date: test_date(),
                lunch_price: Cents::from_cents(600),
            },
        )
        .await?;
    expect_status("lunch-settings as employee", status, StatusCode::UNAUTHORIZED)?;

    let (status, _) = fixture
        .employee
        .post_raw(
            &format!("/api/departments/{}/temporary-employees", fixture.department_id),
            &GuestAssignmentRequest { employee_id: anna },
        )
        .await?;
    expect_status("temporary-employees as employee", status, StatusCode::UNAUTHORIZED)?;
    handle.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn cross_department_admin_is_rejected() -> TestResult {
    let handle = spawn_memory_server().await?;
    let client = ApiClient::new(handle.base_url())?;
    let kitchen = scenarios::setup_department(&client, "Kitchen").await?;
    let annex = scenarios::setup_department(&kitchen.admin, "Annex").await?;

    let (status, _) = kitchen
        .admin
        .put_raw(
            "/api/lunch-settings",
            &LunchSettingsRequest {
                department_id: annex.department_id,
                date: test_date(),
                lunch_price: Cents::from_cents(600),
            },
        )
        .await?;
    expect_status("cross-department lunch-settings", status, StatusCode::UNAUTHORIZED)?;
    handle.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn department_creation_requires_admin_after_bootstrap() -> TestResult {
    let handle = spawn_memory_server().await?;
    let client = ApiClient::new(handle.base_url())?;
    scenarios::setup_department(&client, "Kitchen").await?;
    let (status, _) = client
        .post_raw(
            "/api/departments",
            &CreateDepartmentRequest {
                name: "Annex".to_string(),
                employee_password: "a".to_string(),
                admin_password: "b".to_string(),
                prices: scenarios::standard_prices(),
            },
        )
        .await?;
    expect_status("unauthenticated department creation", status, StatusCode::UNAUTHORIZED)?;
    handle.shutdown().await;
    Ok(())
}
