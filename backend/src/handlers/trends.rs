//! Averaged time-series handler

use axum::{
    extract::{Path, State},
    Json,
};
use shared::{SeriesKind, SeriesPoint};

use crate::error::{AppError, AppResult};
use crate::services::AnalyticsService;
use crate::AppState;

/// Monthly average of one series across every farm
pub async fn get_trend(
    State(state): State<AppState>,
    Path(series): Path<String>,
) -> AppResult<Json<Vec<SeriesPoint>>> {
    let kind = SeriesKind::parse(&series).ok_or_else(|| {
        AppError::validation(
            "series",
            format!(
                "Unknown series '{}', expected one of ndvi, soil_moisture, temperature, rainfall",
                series
            ),
        )
    })?;

    let service = AnalyticsService::new(state.farms.clone(), state.config.dashboard.clone());
    Ok(Json(service.trend(kind)?))
}
