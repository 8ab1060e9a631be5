//! GeoYIELD backend
//!
//! Serves the static farm dataset and the aggregation pipeline over HTTP/JSON.
//! The dataset is loaded once at startup and shared read-only by every handler.

use std::sync::Arc;

use axum::{routing::get, Router};
use shared::FarmRecord;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeFile,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub farms: Arc<[FarmRecord]>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(farms: Vec<FarmRecord>, config: Config) -> Self {
        Self {
            farms: farms.into(),
            config: Arc::new(config),
        }
    }
}

/// Install the global `tracing` subscriber; `RUST_LOG` overrides `default_directives`
pub fn init_tracing(default_directives: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directives.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let dataset_file = ServeFile::new(&state.config.dataset.path);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route_service("/farmData.json", dataset_file)
        .nest("/api/v1", routes::api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(state)
}
