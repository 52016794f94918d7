// crates/kantine-server/src/routes.rs
// ============================================================================
// Module: Server Routes
// Description: HTTP handlers and router for the Kantine API surface.
// Purpose: Bind the wire contract to ledger operations with auth checks.
// Dependencies: axum, chrono, kantine-contract, kantine-core
// ============================================================================

//! ## Overview
//! All endpoint handlers live here, grouped by concern. Every handler
//! authenticates against the session store (except health and the logins),
//! converts wire shapes into ledger operations, and maps ledger errors onto
//! the stable status/code table in [`crate::error`]. Mutations persist a
//! snapshot before the in-memory ledger advances.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::extract::MatchedPath;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::Request;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::middleware;
use axum::middleware::Next;
use axum::response::Response;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use chrono::NaiveDate;
use chrono::Utc;
use kantine_contract::BalancesResponse;
use kantine_contract::CreateDepartmentRequest;
use kantine_contract::CreateEmployeeRequest;
use kantine_contract::DepartmentResponse;
use kantine_contract::EmployeeResponse;
use kantine_contract::GuestAssignmentRequest;
use kantine_contract::GuestAssignmentResponse;
use kantine_contract::HealthResponse;
use kantine_contract::LoginRequest;
use kantine_contract::LoginResponse;
use kantine_contract::LunchSettingsRequest;
use kantine_contract::LunchSettingsResponse;
use kantine_contract::OrderResponse;
use kantine_contract::PlaceOrderRequest;
use kantine_contract::ProfileResponse;
use kantine_contract::SessionRole;
use kantine_contract::SponsorMealRequest;
use kantine_contract::SponsorMealResponse;
use kantine_core::BreakfastHistory;
use kantine_core::CancelActor;
use kantine_core::DailySummary;
use kantine_core::DepartmentId;
use kantine_core::EmployeeId;
use kantine_core::NewDepartment;
use kantine_core::NewOrder;
use kantine_core::OrderId;
use kantine_core::OrderItems;
use kantine_core::OrderType;
use kantine_core::PriceList;
use kantine_core::PriceListUpdate;
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;
use crate::state::verify_password;
use crate::telemetry::RequestMetricEvent;

// ============================================================================
// SECTION: Router
// ============================================================================

/// Builds the full API router over shared state.
#[must_use]
pub fn build_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/departments", post(create_department))
        .route("/api/login/department", post(login_department))
        .route("/api/login/department-admin", post(login_department_admin))
        .route("/api/employees", post(create_employee))
        .route("/api/employees/{id}/profile", get(employee_profile))
        .route("/api/employees/{id}/all-balances", get(employee_all_balances))
        .route(
            "/api/departments/{dept}/temporary-employees",
            post(create_temporary_employee),
        )
        .route("/api/orders", post(place_order))
        .route(
            "/api/employee/{employee_id}/orders/{order_id}",
            delete(cancel_order_self),
        )
        .route("/api/department-admin/orders/{order_id}", delete(cancel_order_admin))
        .route("/api/orders/daily-summary/{dept}", get(daily_summary))
        .route("/api/orders/breakfast-history/{dept}", get(breakfast_history))
        .route("/api/department-admin/sponsor-meal", post(sponsor_meal))
        .route("/api/lunch-settings", put(lunch_settings))
        .route("/api/department-settings/{dept}/prices", get(get_prices).put(put_prices))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(middleware::from_fn_with_state(Arc::clone(&state), track_requests))
        .with_state(state)
}

// ============================================================================
// SECTION: Telemetry Middleware
// ============================================================================

/// Records one metric event per request with the matched route template.
async fn track_requests(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path().to_string(), |matched| matched.as_str().to_string());
    let started = Instant::now();
    let response = next.run(request).await;
    state.metrics().record(&RequestMetricEvent {
        method,
        path,
        status: response.status().as_u16(),
        latency: started.elapsed(),
    });
    response
}

// ============================================================================
// SECTION: Query Shapes
// ============================================================================

/// Date selector for aggregation views.
#[derive(Debug, Deserialize)]
struct DateQuery {
    /// Date in `YYYY-MM-DD` form.
    date: NaiveDate,
}

// ============================================================================
// SECTION: Health Handlers
// ============================================================================

/// Liveness endpoint; no auth.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

// ============================================================================
// SECTION: Department Handlers
// ============================================================================

/// Creates a department. Open during bootstrap, admin-only afterwards.
async fn create_department(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateDepartmentRequest>,
) -> Result<Json<DepartmentResponse>, ApiError> {
    let bootstrapped = state.read(|ledger| Ok(ledger.is_bootstrapped()))?;
    if bootstrapped {
        state.require_any_admin_session(&headers)?;
    }
    let response = state.mutate(|ledger| {
        let department = ledger.create_department(NewDepartment {
            name: body.name.clone(),
            employee_password: body.employee_password.clone(),
            admin_password: body.admin_password.clone(),
            prices: body.prices.clone(),
        })?;
        Ok(DepartmentResponse::from(department))
    })?;
    Ok(Json(response))
}

/// Logs into a department with the employee password.
async fn login_department(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    login(&state, &body, SessionRole::Employee)
}

/// Logs into a department with the admin password.
async fn login_department_admin(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    login(&state, &body, SessionRole::Admin)
}

/// Shared login flow for both roles.
fn login(
    state: &AppState,
    body: &LoginRequest,
    role: SessionRole,
) -> Result<Json<LoginResponse>, ApiError> {
    let department = state.read(|ledger| {
        Ok(ledger.department_by_name(&body.department_name).map(|department| {
            (
                department.id,
                department.employee_password.clone(),
                department.admin_password.clone(),
            )
        }))
    })?;
    let Some((department_id, employee_password, admin_password)) = department else {
        return Err(ApiError::unauthorized("unknown department or wrong password"));
    };
    let expected = match role {
        SessionRole::Employee => employee_password,
        SessionRole::Admin => admin_password,
    };
    if !verify_password(&body.password, &expected) {
        return Err(ApiError::unauthorized("unknown department or wrong password"));
    }
    let access_token = state.issue_session(department_id, role)?;
    Ok(Json(LoginResponse {
        department_id,
        role,
        access_token,
    }))
}

// ============================================================================
// SECTION: Employee Handlers
// ============================================================================

/// Creates an employee in a department.
async fn create_employee(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateEmployeeRequest>,
) -> Result<Json<EmployeeResponse>, ApiError> {
    state.require_department_session(&headers, body.department_id)?;
    let response = state.mutate(|ledger| {
        let employee = ledger.create_employee(body.name.clone(), body.department_id)?;
        Ok(EmployeeResponse::from(employee))
    })?;
    Ok(Json(response))
}

/// Returns an employee's profile with home balances and order history.
async fn employee_profile(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<Json<ProfileResponse>, ApiError> {
    state.authenticate(&headers)?;
    let employee_id = parse_employee_id(id)?;
    let response = state.read(|ledger| {
        let employee = ledger.employee(employee_id)?;
        let orders = ledger
            .orders_for_employee(employee_id)
            .into_iter()
            .map(OrderResponse::from)
            .collect();
        Ok(ProfileResponse {
            employee: EmployeeResponse::from(employee),
            orders,
        })
    })?;
    Ok(Json(response))
}

/// Returns home balances plus all guest subaccounts.
async fn employee_all_balances(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<Json<BalancesResponse>, ApiError> {
    state.authenticate(&headers)?;
    let employee_id = parse_employee_id(id)?;
    let response =
        state.read(|ledger| Ok(BalancesResponse::from(ledger.employee(employee_id)?)))?;
    Ok(Json(response))
}

/// Guest-assigns an employee into a foreign department.
async fn create_temporary_employee(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(dept): Path<u64>,
    Json(body): Json<GuestAssignmentRequest>,
) -> Result<Json<GuestAssignmentResponse>, ApiError> {
    let department_id = parse_department_id(dept)?;
    state.require_admin_session(&headers, department_id)?;
    let subaccount_created =
        state.mutate(|ledger| ledger.assign_guest(body.employee_id, department_id))?;
    Ok(Json(GuestAssignmentResponse {
        employee_id: body.employee_id,
        department_id,
        subaccount_created,
    }))
}

// ============================================================================
// SECTION: Order Handlers
// ============================================================================

/// Places an order in the session's department.
async fn place_order(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<PlaceOrderRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    state.require_department_session(&headers, body.department_id)?;
    let items = order_items_from_request(&body)?;
    let now = Utc::now();
    let response = state.mutate(|ledger| {
        let order = ledger.place_order(
            NewOrder {
                employee_id: body.employee_id,
                department_id: body.department_id,
                date: body.date,
                items,
                notes: body.notes.clone(),
            },
            now,
        )?;
        Ok(OrderResponse::from(order))
    })?;
    Ok(Json(response))
}

/// Cancels an employee's own order.
async fn cancel_order_self(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path((employee_id, order_id)): Path<(u64, u64)>,
) -> Result<Json<OrderResponse>, ApiError> {
    let employee_id = parse_employee_id(employee_id)?;
    let order_id = parse_order_id(order_id)?;
    let department_id =
        state.read(|ledger| Ok(ledger.order(order_id)?.department_id))?;
    state.require_department_session(&headers, department_id)?;
    let now = Utc::now();
    let response = state.mutate(|ledger| {
        let order = ledger.cancel_order(order_id, &CancelActor::Employee(employee_id), now)?;
        Ok(OrderResponse::from(order))
    })?;
    Ok(Json(response))
}

/// Cancels any order as the department admin.
async fn cancel_order_admin(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(order_id): Path<u64>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_order_id(order_id)?;
    let department_id =
        state.read(|ledger| Ok(ledger.order(order_id)?.department_id))?;
    state.require_admin_session(&headers, department_id)?;
    let now = Utc::now();
    let response = state.mutate(|ledger| {
        let order = ledger.cancel_order(order_id, &CancelActor::Admin, now)?;
        Ok(OrderResponse::from(order))
    })?;
    Ok(Json(response))
}

/// Converts the wire order payload into ledger order items.
///
/// Exactly the item field matching `order_type` must be present.
fn order_items_from_request(body: &PlaceOrderRequest) -> Result<OrderItems, ApiError> {
    match body.order_type {
        OrderType::Breakfast => match (&body.breakfast_items, &body.drink_items, &body.sweet_items)
        {
            (Some(items), None, None) => Ok(OrderItems::Breakfast(items.clone())),
            _ => Err(ApiError::validation(
                "breakfast orders carry exactly breakfast_items",
            )),
        },
        OrderType::Drinks => match (&body.breakfast_items, &body.drink_items, &body.sweet_items) {
            (None, Some(items), None) => Ok(OrderItems::Drinks(items.clone())),
            _ => Err(ApiError::validation("drinks orders carry exactly drink_items")),
        },
        OrderType::Sweets => match (&body.breakfast_items, &body.drink_items, &body.sweet_items) {
            (None, None, Some(items)) => Ok(OrderItems::Sweets(items.clone())),
            _ => Err(ApiError::validation("sweets orders carry exactly sweet_items")),
        },
    }
}

// ============================================================================
// SECTION: Aggregation Handlers
// ============================================================================

/// Returns the daily summary for a department and date.
async fn daily_summary(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(dept): Path<u64>,
    Query(query): Query<DateQuery>,
) -> Result<Json<DailySummary>, ApiError> {
    state.authenticate(&headers)?;
    let department_id = parse_department_id(dept)?;
    let summary = state.read(|ledger| ledger.daily_summary(department_id, query.date))?;
    Ok(Json(summary))
}

/// Returns the breakfast history for a department and date.
async fn breakfast_history(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(dept): Path<u64>,
    Query(query): Query<DateQuery>,
) -> Result<Json<BreakfastHistory>, ApiError> {
    state.authenticate(&headers)?;
    let department_id = parse_department_id(dept)?;
    let history = state.read(|ledger| ledger.breakfast_history(department_id, query.date))?;
    Ok(Json(history))
}

// ============================================================================
// SECTION: Sponsoring Handlers
// ============================================================================

/// Runs a sponsoring transfer in the admin session's department.
async fn sponsor_meal(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<SponsorMealRequest>,
) -> Result<Json<SponsorMealResponse>, ApiError> {
    let session = state.require_any_admin_session(&headers)?;
    let response = state.mutate(|ledger| {
        let record = ledger.sponsor_meal(
            session.department_id,
            body.date,
            body.meal_type,
            body.sponsor_employee_id,
        )?;
        Ok(SponsorMealResponse::from(record))
    })?;
    Ok(Json(response))
}

// ============================================================================
// SECTION: Settings Handlers
// ============================================================================

/// Sets the lunch price for a date and reprices existing orders.
async fn lunch_settings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<LunchSettingsRequest>,
) -> Result<Json<LunchSettingsResponse>, ApiError> {
    state.require_admin_session(&headers, body.department_id)?;
    let response = state.mutate(|ledger| {
        let outcome = ledger.set_lunch_price(body.department_id, body.date, body.lunch_price)?;
        Ok(LunchSettingsResponse::from(&outcome))
    })?;
    Ok(Json(response))
}

/// Returns a department's full price list.
async fn get_prices(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(dept): Path<u64>,
) -> Result<Json<PriceList>, ApiError> {
    state.authenticate(&headers)?;
    let department_id = parse_department_id(dept)?;
    let prices = state.read(|ledger| Ok(ledger.department(department_id)?.prices.clone()))?;
    Ok(Json(prices))
}

/// Applies a partial price list update.
async fn put_prices(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(dept): Path<u64>,
    Json(body): Json<PriceListUpdate>,
) -> Result<Json<PriceList>, ApiError> {
    let department_id = parse_department_id(dept)?;
    state.require_admin_session(&headers, department_id)?;
    let prices =
        state.mutate(|ledger| ledger.update_prices(department_id, body).map(Clone::clone))?;
    Ok(Json(prices))
}

// ============================================================================
// SECTION: Path Helpers
// ============================================================================

/// Parses a raw department path parameter.
fn parse_department_id(raw: u64) -> Result<DepartmentId, ApiError> {
    DepartmentId::from_raw(raw).ok_or_else(|| ApiError::not_found("unknown department"))
}

/// Parses a raw employee path parameter.
fn parse_employee_id(raw: u64) -> Result<EmployeeId, ApiError> {
    EmployeeId::from_raw(raw).ok_or_else(|| ApiError::not_found("unknown employee"))
}

/// Parses a raw order path parameter.
fn parse_order_id(raw: u64) -> Result<OrderId, ApiError> {
    OrderId::from_raw(raw).ok_or_else(|| ApiError::not_found("unknown order"))
}
