//! Dashboard, state and trend analytics over the loaded dataset

use std::sync::Arc;

use chrono::{DateTime, Utc};
use shared::catalog::find_state;
use shared::dashboard::{
    district_variance, state_performance, DashboardSummary, DistrictVariance, PricingAssumptions,
    StatePerformance,
};
use shared::{
    average_series_across, filter_by_field, FarmField, FarmRecord, SeriesKind, SeriesPoint,
};

use crate::error::{AppError, AppResult};

pub struct AnalyticsService {
    farms: Arc<[FarmRecord]>,
    pricing: PricingAssumptions,
}

impl AnalyticsService {
    pub fn new(farms: Arc<[FarmRecord]>, pricing: PricingAssumptions) -> Self {
        Self { farms, pricing }
    }

    fn farms(&self) -> &[FarmRecord] {
        &self.farms
    }

    /// Full dashboard, optionally restricted to one state
    pub fn dashboard(&self, state: Option<&str>, now: DateTime<Utc>) -> AppResult<DashboardSummary> {
        let selected = filter_by_field(self.farms(), FarmField::State, state);
        tracing::debug!(
            state = state.unwrap_or("all"),
            farms = selected.len(),
            "Building dashboard summary"
        );
        Ok(DashboardSummary::build(&selected, &self.pricing, now)?)
    }

    pub fn state_performance(&self) -> Vec<StatePerformance> {
        let farms: Vec<&FarmRecord> = self.farms.iter().collect();
        state_performance(&farms)
    }

    /// District breakdown of a catalog state; unknown states are a 404
    pub fn district_variance(&self, state: &str) -> AppResult<Vec<DistrictVariance>> {
        let info = find_state(state).ok_or_else(|| AppError::NotFound(format!("State {}", state)))?;
        Ok(district_variance(self.farms(), info.name))
    }

    /// Averaged monthly series across every farm
    pub fn trend(&self, kind: SeriesKind) -> AppResult<Vec<SeriesPoint>> {
        Ok(average_series_across(self.farms(), kind)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shared::generator::generate_dataset;

    fn service() -> AnalyticsService {
        let now = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        AnalyticsService::new(generate_dataset(60, 3, now).into(), PricingAssumptions::default())
    }

    #[test]
    fn test_unknown_state_is_not_found() {
        assert!(matches!(
            service().district_variance("Atlantis"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_trend_has_twelve_points() {
        assert_eq!(service().trend(SeriesKind::Rainfall).unwrap().len(), 12);
    }
}
