//! Reporting handlers for the bottom-performer table and its export

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::services::ReportingService;
use crate::AppState;

#[derive(Deserialize)]
pub struct BottomReportQuery {
    pub n: Option<usize>,
    pub format: Option<String>, // "json" or "csv"
}

/// Farms with the lowest yield variance
pub async fn get_bottom_performers(
    State(state): State<AppState>,
    Query(query): Query<BottomReportQuery>,
) -> AppResult<impl IntoResponse> {
    let n = query.n.unwrap_or(state.config.reports.bottom_n);
    let service = ReportingService::new(state.farms.clone());
    let rows = service.bottom_performers(n);

    match query.format.as_deref() {
        Some("csv") => {
            let csv = ReportingService::export_to_csv(&rows)?;
            Ok((
                [
                    (header::CONTENT_TYPE, "text/csv"),
                    (
                        header::CONTENT_DISPOSITION,
                        "attachment; filename=\"bottom_performers.csv\"",
                    ),
                ],
                csv,
            )
                .into_response())
        }
        None | Some("json") => Ok(Json(rows).into_response()),
        Some(other) => Err(AppError::validation(
            "format",
            format!("Unsupported format '{}', expected json or csv", other),
        )),
    }
}
