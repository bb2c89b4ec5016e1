use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::slot::format_hhmm;
use crate::models::{Booking, Step, Wizard, WizardAction};
use crate::services::wizard::{
    apply, booking_dates, offered_slots, progress, Navigation, Progress, WizardContext,
};
use crate::state::AppState;

#[derive(Serialize)]
pub struct WizardView {
    id: String,
    #[serde(flatten)]
    wizard: Wizard,
    progress: Progress,
    total_duration_minutes: u32,
    total_price: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    dates: Vec<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    available_slots: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    booking: Option<Booking>,
}

fn wizard_view(id: &str, wizard: &Wizard, ctx: &WizardContext<'_>, bookings: &[Booking]) -> WizardView {
    let totals = ctx.catalog.totals(&wizard.services);
    let at_time = wizard.step == Step::Time;

    WizardView {
        id: id.to_string(),
        wizard: wizard.clone(),
        progress: progress(wizard),
        total_duration_minutes: totals.duration_minutes,
        total_price: totals.price,
        dates: if at_time {
            booking_dates(ctx)
        } else {
            Vec::new()
        },
        available_slots: at_time.then(|| {
            offered_slots(wizard, ctx, bookings)
                .iter()
                .map(format_hhmm)
                .collect()
        }),
        booking: wizard
            .booking_id
            .as_deref()
            .and_then(|booking_id| bookings.iter().find(|b| b.id == booking_id))
            .cloned(),
    }
}

fn session_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("wizard session {id}"))
}

// POST /api/wizard
pub async fn start_wizard(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let today = state.today();
    let ctx = state.wizard_context(today);

    let mut sessions = state.sessions()?;
    let session = sessions.create(today, state.now());
    tracing::info!(session_id = %session.id, "wizard started");

    let store = state.store()?;
    let view = wizard_view(&session.id, &session.wizard, &ctx, store.list());
    Ok((StatusCode::CREATED, Json(view)).into_response())
}

// GET /api/wizard/:id
pub async fn get_wizard(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<WizardView>, AppError> {
    let ctx = state.wizard_context(state.today());

    let mut sessions = state.sessions()?;
    let session = sessions
        .touch(&id, state.now())
        .ok_or_else(|| session_not_found(&id))?;

    let store = state.store()?;
    Ok(Json(wizard_view(&id, &session.wizard, &ctx, store.list())))
}

// POST /api/wizard/:id/actions
pub async fn apply_action(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(action): Json<WizardAction>,
) -> Result<Response, AppError> {
    let ctx = state.wizard_context(state.today());

    let mut sessions = state.sessions()?;
    let session = sessions
        .touch(&id, state.now())
        .ok_or_else(|| session_not_found(&id))?;

    let mut store = state.store()?;
    let navigation = match apply(&mut session.wizard, action, &ctx, &mut store) {
        Ok(navigation) => navigation,
        Err(e) => {
            tracing::debug!(session_id = %id, step = session.wizard.step.as_str(), error = %e, "wizard action rejected");
            return Err(e.into());
        }
    };

    if navigation == Navigation::Exited {
        sessions.remove(&id);
        tracing::info!(session_id = %id, "wizard exited");
        return Ok(Json(serde_json::json!({ "exited": true })).into_response());
    }

    if navigation == Navigation::Moved(Step::Booked) {
        tracing::info!(
            session_id = %id,
            booking_id = session.wizard.booking_id.as_deref().unwrap_or_default(),
            "booking confirmed"
        );
    }

    Ok(Json(wizard_view(&id, &session.wizard, &ctx, store.list())).into_response())
}
