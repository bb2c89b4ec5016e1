use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{Barber, Booking, BookingStatus, BookingUpdate};
use crate::services::dashboard::{self, CalendarEntry, WeekView};
use crate::state::AppState;

const PIN_MISMATCH: &str = "Incorrect PIN";

/// Resolves the barber from `Authorization: Bearer <pin>`.
fn check_auth<'a>(state: &'a AppState, headers: &HeaderMap) -> Result<&'a Barber, AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let pin = auth.strip_prefix("Bearer ").unwrap_or("");
    dashboard::authenticate(&state.catalog, pin)
        .ok_or_else(|| AppError::Unauthorized(PIN_MISMATCH.to_string()))
}

// POST /api/dashboard/login
#[derive(Deserialize)]
pub struct LoginRequest {
    pub pin: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Barber>, AppError> {
    match dashboard::authenticate(&state.catalog, &payload.pin) {
        Some(barber) => {
            tracing::info!(barber_id = %barber.id, "barber signed in");
            Ok(Json(barber.clone()))
        }
        None => {
            tracing::warn!("barber login failed");
            Err(AppError::Unauthorized(PIN_MISMATCH.to_string()))
        }
    }
}

// GET /api/dashboard/week
#[derive(Deserialize)]
pub struct WeekQuery {
    pub offset: Option<i64>,
}

pub async fn get_week(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<WeekQuery>,
) -> Result<Json<WeekView>, AppError> {
    let barber = check_auth(&state, &headers)?;
    let offset = query.offset.unwrap_or(0);

    let store = state.store()?;
    Ok(Json(dashboard::week_view(
        &state.catalog,
        &state.grid,
        store.list(),
        barber,
        state.today(),
        offset,
    )))
}

// GET /api/dashboard/bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<CalendarEntry>, AppError> {
    let barber = check_auth(&state, &headers)?;

    let store = state.store()?;
    dashboard::booking_detail(&state.catalog, &state.grid, store.list(), &barber.id, &id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("booking {id}")))
}

// POST /api/dashboard/bookings/:id/cancel
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let barber = check_auth(&state, &headers)?;

    let mut store = state.store()?;
    let owned = store
        .get(&id)
        .is_some_and(|b| b.barber_id == barber.id);
    if !owned {
        return Err(AppError::NotFound(format!("booking {id}")));
    }

    let booking = store
        .update(&id, &BookingUpdate::status(BookingStatus::Canceled))?
        .clone();
    tracing::info!(booking_id = %id, barber_id = %barber.id, "booking canceled");
    Ok(Json(booking))
}
