//! State and district breakdown handlers

use axum::{
    extract::{Path, State},
    Json,
};
use shared::dashboard::{DistrictVariance, StatePerformance};

use crate::error::AppResult;
use crate::services::AnalyticsService;
use crate::AppState;

/// Farms, area and yield per state
pub async fn list_states(State(state): State<AppState>) -> Json<Vec<StatePerformance>> {
    let service = AnalyticsService::new(state.farms.clone(), state.config.dashboard.clone());
    Json(service.state_performance())
}

/// Average yield variance per district of one state
pub async fn get_state_districts(
    State(state): State<AppState>,
    Path(state_name): Path<String>,
) -> AppResult<Json<Vec<DistrictVariance>>> {
    let service = AnalyticsService::new(state.farms.clone(), state.config.dashboard.clone());
    Ok(Json(service.district_variance(&state_name)?))
}
