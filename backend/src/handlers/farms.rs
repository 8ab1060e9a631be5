//! Farm report table and farm detail handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use shared::report::{FarmDetail, ReportFilter};
use shared::{FarmRecord, PaginatedResponse, Pagination};

use crate::error::AppResult;
use crate::services::ReportingService;
use crate::AppState;

#[derive(Deserialize)]
pub struct FarmListQuery {
    pub state: Option<String>,
    pub crop: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// List farms with filters; the page is clamped to the filtered range
pub async fn list_farms(
    State(state): State<AppState>,
    Query(query): Query<FarmListQuery>,
) -> AppResult<Json<PaginatedResponse<FarmRecord>>> {
    let filter = ReportFilter {
        state: query.state,
        crop_type: query.crop,
        search: query.search,
    };
    let pagination = Pagination {
        page: query.page.unwrap_or(1),
        per_page: query
            .per_page
            .unwrap_or(state.config.reports.default_page_size),
    };

    let service = ReportingService::new(state.farms.clone());
    Ok(Json(service.farm_page(&filter, &pagination)?))
}

/// Get a single farm with its yield gap
pub async fn get_farm(
    State(state): State<AppState>,
    Path(farm_id): Path<String>,
) -> AppResult<Json<FarmDetail>> {
    let service = ReportingService::new(state.farms.clone());
    Ok(Json(service.farm_detail(&farm_id)?))
}
