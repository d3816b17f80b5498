use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::errors::AppError;
use crate::handlers::auth::current_user;
use crate::handlers::extract::{ApiJson, ApiQuery};
use crate::models::booking::local_datetime;
use crate::models::{Booking, BookingDetails, BookingQuery, BookingStatus, NewBooking, Role, User};
use crate::services::dashboard::BookingSummary;
use crate::state::AppState;

fn load(state: &AppState, id: &str) -> Result<Booking, AppError> {
    state
        .store
        .get_by_id(id)?
        .ok_or_else(|| AppError::NotFound(id.to_string()))
}

fn require(allowed: bool, action: &str, user: &User) -> Result<(), AppError> {
    if allowed {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "{} users cannot {action}",
            user.role.as_str()
        )))
    }
}

// GET /api/bookings
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub status: Option<String>,
    pub search: Option<String>,
    pub requester_id: Option<i64>,
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    current_user(&headers, &state)?;

    let status = query
        .status
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|s| {
            BookingStatus::parse(s)
                .ok_or_else(|| AppError::Validation(format!("unknown status: {s}")))
        })
        .transpose()?;

    let bookings = state.store.list_all(&BookingQuery {
        status,
        search: query.search,
        requester_id: query.requester_id,
    })?;

    Ok(Json(bookings))
}

// GET /api/bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    current_user(&headers, &state)?;
    Ok(Json(load(&state, &id)?))
}

// POST /api/bookings
// The requester is whoever calls; a requesterId in the body is ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub purpose: String,
    #[serde(with = "local_datetime")]
    pub start_time: NaiveDateTime,
    #[serde(with = "local_datetime")]
    pub end_time: NaiveDateTime,
    #[serde(default)]
    pub vehicle_id: Option<i64>,
    #[serde(default)]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub pickup_location: Option<String>,
    #[serde(default)]
    pub dropoff_location: Option<String>,
    #[serde(default)]
    pub passenger_count: Option<u32>,
}

impl CreateBookingRequest {
    fn for_requester(self, requester_id: i64) -> NewBooking {
        NewBooking {
            id: self.id,
            requester_id,
            purpose: self.purpose,
            status: None,
            start_time: self.start_time,
            end_time: self.end_time,
            vehicle_id: self.vehicle_id,
            vehicle_type: self.vehicle_type,
            pickup_location: self.pickup_location,
            dropoff_location: self.dropoff_location,
            passenger_count: self.passenger_count,
        }
    }
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiJson(body): ApiJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let user = current_user(&headers, &state)?;

    let booking = state.store.create(body.for_requester(user.id))?;
    Ok((StatusCode::CREATED, Json(booking)))
}

// PATCH /api/bookings/:id
pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<BookingDetails>,
) -> Result<Json<Booking>, AppError> {
    let user = current_user(&headers, &state)?;
    let booking = load(&state, &id)?;
    require(
        user.role == Role::Admin || booking.requester_id == user.id,
        "edit other users' bookings",
        &user,
    )?;

    Ok(Json(state.store.update_details(&id, body)?))
}

// POST /api/bookings/:id/approve
pub async fn approve_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let user = current_user(&headers, &state)?;
    require(user.role.can_decide(), "approve bookings", &user)?;

    Ok(Json(state.store.approve(&id)?))
}

// POST /api/bookings/:id/reject
#[derive(Deserialize)]
pub struct RejectRequest {
    #[serde(default)]
    pub reason: String,
}

pub async fn reject_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<RejectRequest>,
) -> Result<Json<Booking>, AppError> {
    let user = current_user(&headers, &state)?;
    require(user.role.can_decide(), "reject bookings", &user)?;

    Ok(Json(state.store.reject(&id, &body.reason)?))
}

// POST /api/bookings/:id/cancel
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let user = current_user(&headers, &state)?;
    let booking = load(&state, &id)?;
    require(
        user.role.can_decide() || booking.requester_id == user.id,
        "cancel other users' bookings",
        &user,
    )?;

    Ok(Json(state.store.cancel(&id)?))
}

// POST /api/bookings/:id/start
pub async fn start_trip(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let user = current_user(&headers, &state)?;
    require(user.role.can_drive(), "start trips", &user)?;

    Ok(Json(state.store.start_trip(&id)?))
}

// POST /api/bookings/:id/complete
pub async fn complete_trip(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let user = current_user(&headers, &state)?;
    require(user.role.can_drive(), "complete trips", &user)?;

    Ok(Json(state.store.complete(&id)?))
}

// DELETE /api/bookings
pub async fn clear_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let user = current_user(&headers, &state)?;
    require(user.role == Role::Admin, "clear bookings", &user)?;

    state.store.clear()?;
    tracing::warn!(user_id = user.id, "all bookings cleared");
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/dashboard
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<BookingSummary>, AppError> {
    let user = current_user(&headers, &state)?;

    let mine = state.store.list_all(&BookingQuery {
        requester_id: Some(user.id),
        ..Default::default()
    })?;

    Ok(Json(BookingSummary::from_bookings(&mine)))
}
