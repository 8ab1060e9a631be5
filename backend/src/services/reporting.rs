//! Report table, farm detail and bottom-performer exports

use std::sync::Arc;

use serde::Serialize;
use shared::report::{bottom_performers, farm_detail, report_page, FarmDetail, FarmReportRow, ReportFilter};
use shared::{validate_farm_id, FarmRecord, PaginatedResponse, Pagination};

use crate::error::{AppError, AppResult};

pub struct ReportingService {
    farms: Arc<[FarmRecord]>,
}

impl ReportingService {
    pub fn new(farms: Arc<[FarmRecord]>) -> Self {
        Self { farms }
    }

    fn farms(&self) -> &[FarmRecord] {
        &self.farms
    }

    /// One page of the filtered report table; out-of-range pages are clamped
    pub fn farm_page(
        &self,
        filter: &ReportFilter,
        pagination: &Pagination,
    ) -> AppResult<PaginatedResponse<FarmRecord>> {
        Ok(report_page(self.farms(), filter, pagination)?)
    }

    pub fn farm_detail(&self, farm_id: &str) -> AppResult<FarmDetail> {
        validate_farm_id(farm_id).map_err(|msg| AppError::validation("farm_id", msg))?;
        farm_detail(self.farms(), farm_id)
            .ok_or_else(|| AppError::NotFound(format!("Farm {}", farm_id)))
    }

    pub fn bottom_performers(&self, n: usize) -> Vec<FarmReportRow> {
        bottom_performers(self.farms(), n)
            .into_iter()
            .map(FarmReportRow::from)
            .collect()
    }

    /// Export data to CSV format
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
    }
}
