use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{AccountStatus, ReservationStatus, StatusFilter};
use crate::services::moderation::{self, AccountFilter};
use crate::services::reservations;
use crate::state::AppState;

fn check_auth(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token != expected_token {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

// GET /api/admin/reservations
#[derive(Deserialize)]
pub struct ReservationsQuery {
    pub date: Option<NaiveDate>,
    pub status: Option<String>,
}

#[derive(Serialize)]
pub struct ReservationResponse {
    id: String,
    date: String,
    time: String,
    customer_name: String,
    is_new_customer: bool,
    menu: String,
    price: i64,
    duration_minutes: i32,
    staff: Option<String>,
    status: String,
    status_label: String,
}

#[derive(Serialize)]
pub struct ReservationListResponse {
    date: NaiveDate,
    previous_date: NaiveDate,
    next_date: NaiveDate,
    status: String,
    reservations: Vec<ReservationResponse>,
}

pub async fn get_reservations(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ReservationsQuery>,
) -> Result<Json<ReservationListResponse>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let date = query.date.unwrap_or_else(|| Local::now().date_naive());
    let status = query.status.unwrap_or_else(|| "all".to_string());
    let filter = StatusFilter::parse(&status)
        .ok_or_else(|| AppError::BadRequest(format!("unknown status filter: {status}")))?;

    let rows = {
        let db = state.db()?;
        reservations::list_for_day(&db, date, filter)?
    };

    let reservations = rows
        .into_iter()
        .map(|r| ReservationResponse {
            id: r.id,
            date: r.date,
            time: r.time,
            customer_name: r.customer_name,
            is_new_customer: r.is_new_customer,
            menu: r.menu,
            price: r.price,
            duration_minutes: r.duration_minutes,
            staff: r.staff,
            status: r.status.as_str().to_string(),
            status_label: r.status.label().to_string(),
        })
        .collect();

    Ok(Json(ReservationListResponse {
        date,
        previous_date: reservations::shift_day(date, -1),
        next_date: reservations::shift_day(date, 1),
        status,
        reservations,
    }))
}

// POST /api/admin/reservations/:id/status
#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

pub async fn update_reservation_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let status = ReservationStatus::parse(&body.status)
        .ok_or_else(|| AppError::BadRequest(format!("unknown status: {}", body.status)))?;

    let updated = {
        let db = state.db()?;
        reservations::change_status(&db, &id, status)?
    };

    if updated {
        Ok(Json(serde_json::json!({"ok": true, "status": status.as_str()})))
    } else {
        Err(AppError::NotFound(format!("reservation {id}")))
    }
}

// GET /api/admin/users
#[derive(Deserialize)]
pub struct UsersQuery {
    pub filter: Option<String>,
}

#[derive(Serialize)]
pub struct UserResponse {
    id: i64,
    name: String,
    email: String,
    phone: String,
    registered_at: String,
    booking_count: i64,
    cancel_count: i64,
    status: AccountStatus,
    high_risk: bool,
}

#[derive(Serialize)]
pub struct UserListResponse {
    suspended_count: i64,
    users: Vec<UserResponse>,
}

pub async fn get_users(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<UsersQuery>,
) -> Result<Json<UserListResponse>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let filter = match query.filter.as_deref() {
        None => AccountFilter::All,
        Some(raw) => AccountFilter::parse(raw)
            .ok_or_else(|| AppError::BadRequest(format!("unknown user filter: {raw}")))?,
    };

    let (accounts, suspended_count) = {
        let db = state.db()?;
        (
            moderation::list_accounts(&db, filter)?,
            moderation::suspended_count(&db)?,
        )
    };

    let users = accounts
        .into_iter()
        .map(|u| UserResponse {
            high_risk: u.is_high_risk(),
            id: u.id,
            name: u.name,
            email: u.email,
            phone: u.phone,
            registered_at: u.registered_at,
            booking_count: u.booking_count,
            cancel_count: u.cancel_count,
            status: u.status,
        })
        .collect();

    Ok(Json(UserListResponse {
        suspended_count,
        users,
    }))
}

// POST /api/admin/users/:id/toggle
pub async fn toggle_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let status = {
        let db = state.db()?;
        moderation::toggle_status(&db, id)?
    };

    match status {
        Some(status) => Ok(Json(serde_json::json!({"ok": true, "status": status.as_str()}))),
        None => Err(AppError::NotFound(format!("user {id}"))),
    }
}
