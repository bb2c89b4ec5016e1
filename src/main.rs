use std::sync::Arc;

use chrono::Local;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use barbershop::config::AppConfig;
use barbershop::routes;
use barbershop::state::AppState;
use barbershop::store::BookingStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let store = if config.seed_mock_data {
        let store = BookingStore::seeded(Local::now().date_naive());
        tracing::info!(count = store.list().len(), "seeded mock bookings");
        store
    } else {
        BookingStore::new()
    };

    let state = Arc::new(AppState::new(config.clone(), store)?);
    tracing::info!(
        shop = %config.shop_name,
        slots = state.grid.slots().len(),
        "slot grid ready"
    );

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
