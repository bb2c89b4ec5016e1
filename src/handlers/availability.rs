use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::slot::format_hhmm;
use crate::services::availability::{available_slots, bookable_slots};
use crate::state::AppState;

const MAX_DURATION_MINUTES: u32 = 24 * 60;

#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub barber_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub duration: Option<u32>,
}

#[derive(Serialize)]
pub struct AvailabilityResponse {
    barber_id: Option<String>,
    date: Option<NaiveDate>,
    slots: Vec<String>,
}

// GET /api/availability
pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let barber_id = query.barber_id.filter(|id| !id.is_empty());
    if let Some(id) = &barber_id {
        if state.catalog.barber(id).is_none() {
            return Err(AppError::NotFound(format!("barber {id}")));
        }
    }

    if let Some(duration) = query.duration {
        if duration > MAX_DURATION_MINUTES {
            return Err(AppError::Validation(format!(
                "duration must be at most {MAX_DURATION_MINUTES} minutes"
            )));
        }
    }

    let grid = state.grid.slots();
    let slots = {
        let store = state.store()?;
        match query.duration {
            Some(duration) => bookable_slots(
                &grid,
                barber_id.as_deref(),
                query.date,
                store.list(),
                duration,
            ),
            None => available_slots(&grid, barber_id.as_deref(), query.date, store.list()),
        }
    };

    Ok(Json(AvailabilityResponse {
        barber_id,
        date: query.date,
        slots: slots.iter().map(format_hhmm).collect(),
    }))
}
