use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::models::{Barber, Service};
use crate::state::AppState;

// GET /api/services
pub async fn list_services(State(state): State<Arc<AppState>>) -> Json<Vec<Service>> {
    Json(state.catalog.services.clone())
}

// GET /api/barbers
pub async fn list_barbers(State(state): State<Arc<AppState>>) -> Json<Vec<Barber>> {
    Json(state.catalog.barbers.clone())
}
