//! Route definitions for the GeoYIELD API

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/dashboard", get(handlers::get_dashboard))
        .nest("/states", state_routes())
        .nest("/farms", farm_routes())
        .nest("/reports", report_routes())
        .route("/trends/:series", get(handlers::get_trend))
}

/// State and district breakdowns
fn state_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_states))
        .route("/:state/districts", get(handlers::get_state_districts))
}

/// Report table and farm detail
fn farm_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_farms))
        .route("/:farm_id", get(handlers::get_farm))
}

fn report_routes() -> Router<AppState> {
    Router::new().route("/bottom", get(handlers::get_bottom_performers))
}
