//! Dashboard handler

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use shared::dashboard::DashboardSummary;

use crate::error::AppResult;
use crate::services::AnalyticsService;
use crate::AppState;

#[derive(Deserialize)]
pub struct DashboardQuery {
    /// Restrict every panel to one state
    pub state: Option<String>,
}

/// Get the dashboard summary
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Json<DashboardSummary>> {
    let service = AnalyticsService::new(state.farms.clone(), state.config.dashboard.clone());
    let summary = service.dashboard(query.state.as_deref(), Utc::now())?;
    Ok(Json(summary))
}
