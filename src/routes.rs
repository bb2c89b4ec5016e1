use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::pages::landing_page))
        .route("/health", get(handlers::health::health))
        .route("/api/services", get(handlers::catalog::list_services))
        .route("/api/barbers", get(handlers::catalog::list_barbers))
        .route(
            "/api/availability",
            get(handlers::availability::get_availability),
        )
        .route("/api/wizard", post(handlers::wizard::start_wizard))
        .route("/api/wizard/:id", get(handlers::wizard::get_wizard))
        .route(
            "/api/wizard/:id/actions",
            post(handlers::wizard::apply_action),
        )
        .route("/api/dashboard/login", post(handlers::dashboard::login))
        .route("/api/dashboard/week", get(handlers::dashboard::get_week))
        .route(
            "/api/dashboard/bookings/:id",
            get(handlers::dashboard::get_booking),
        )
        .route(
            "/api/dashboard/bookings/:id/cancel",
            post(handlers::dashboard::cancel_booking),
        )
        .with_state(state)
}
