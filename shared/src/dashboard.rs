//! Dashboard summaries built on the aggregation pipeline
//!
//! Provides the KPI cards, economic estimates, risk counts, state and district
//! breakdowns, distributions and averaged trends shown on the main dashboard.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregation::{
    as_farm, average_series_across, count_where, group_aggregate_by, group_count_by, sum_by,
    total_count, FarmField, GroupedBy, NumericField,
};
use crate::error::{CoreError, CoreResult};
use crate::models::{FarmRecord, HealthStatus, SeriesKind, SeriesPoint};

/// Scans newer than this count as recent
pub const RECENT_SCAN_DAYS: i64 = 30;

/// Soil moisture (%) treated as fully unstressed
const WATER_STRESS_CEILING: f64 = 60.0;

/// Mock unit prices used for the economic estimates (INR)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingAssumptions {
    pub price_per_ton_inr: Decimal,
    pub cost_per_hectare_inr: Decimal,
    pub insurance_per_hectare_inr: Decimal,
}

impl Default for PricingAssumptions {
    fn default() -> Self {
        Self {
            price_per_ton_inr: Decimal::from(20_000),
            cost_per_hectare_inr: Decimal::from(5_000),
            insurance_per_hectare_inr: Decimal::from(10_000),
        }
    }
}

/// Headline counts and totals
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    pub total_farms: usize,
    pub total_area_hectares: f64,
    pub total_expected_yield: f64,
    pub total_predicted_yield: f64,
    pub healthy_farms: usize,
    pub healthy_percent: f64,
}

impl KpiSummary {
    pub fn compute(farms: &[&FarmRecord]) -> Self {
        let total_farms = total_count(farms);
        let healthy_farms = count_where(farms, |f| f.is_healthy());
        Self {
            total_farms,
            total_area_hectares: sum_by(farms, |f| f.farm_size),
            total_expected_yield: sum_by(farms, |f| f.expected_yield),
            total_predicted_yield: sum_by(farms, |f| f.predicted_yield),
            healthy_farms,
            healthy_percent: percent(healthy_farms, total_farms),
        }
    }
}

/// Revenue, cost, profit and insurance estimates
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EconomicSummary {
    pub revenue_inr: Decimal,
    pub costs_inr: Decimal,
    pub profit_inr: Decimal,
    pub insurance_coverage_inr: Decimal,
}

impl EconomicSummary {
    pub fn compute(kpis: &KpiSummary, pricing: &PricingAssumptions) -> CoreResult<Self> {
        let tons = to_decimal(kpis.total_predicted_yield, "predictedYield")?;
        let hectares = to_decimal(kpis.total_area_hectares, "farmSize")?;

        let revenue = (tons * pricing.price_per_ton_inr).round_dp(2);
        let costs = (hectares * pricing.cost_per_hectare_inr).round_dp(2);
        Ok(Self {
            revenue_inr: revenue,
            costs_inr: costs,
            profit_inr: revenue - costs,
            insurance_coverage_inr: (hectares * pricing.insurance_per_hectare_inr).round_dp(2),
        })
    }
}

/// Farms per risk category
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RiskSummary {
    pub weather: usize,
    pub pest: usize,
    pub water: usize,
    pub disease: usize,
    pub total: usize,
    /// Weather-damaged plus pest-stressed farms
    pub alerts: usize,
}

impl RiskSummary {
    pub fn compute(farms: &[&FarmRecord]) -> Self {
        let with_status =
            |status: HealthStatus| count_where(farms, |f| f.health_status == status);
        let weather = with_status(HealthStatus::DamagedWeather);
        let pest = with_status(HealthStatus::StressedPest);
        Self {
            weather,
            pest,
            water: with_status(HealthStatus::StressedWater),
            disease: with_status(HealthStatus::CriticalDisease),
            total: total_count(farms),
            alerts: weather + pest,
        }
    }
}

/// One bar of the state-wise performance chart
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatePerformance {
    pub state: String,
    pub farms: usize,
    pub area_hectares: f64,
    pub total_predicted_yield: f64,
    pub average_yield: f64,
}

/// Per-state farms, area and yield, in first-occurrence order
pub fn state_performance(farms: &[&FarmRecord]) -> Vec<StatePerformance> {
    group_aggregate_by(
        farms,
        |f| f.state.as_str(),
        &[NumericField::FarmSize, NumericField::PredictedYield],
    )
    .into_entries()
    .into_iter()
    .map(|(state, agg)| StatePerformance {
        farms: agg.count,
        area_hectares: agg.sum(NumericField::FarmSize).unwrap_or_default(),
        total_predicted_yield: agg.sum(NumericField::PredictedYield).unwrap_or_default(),
        average_yield: agg.average(NumericField::PredictedYield).unwrap_or_default(),
        state,
    })
    .collect()
}

/// Average yield variance of one district
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DistrictVariance {
    pub district: String,
    pub farms: usize,
    pub avg_variance: f64,
}

/// Average yield variance per district of `state`
pub fn district_variance<T>(farms: &[T], state: &str) -> Vec<DistrictVariance>
where
    T: std::borrow::Borrow<FarmRecord>,
{
    let in_state = crate::aggregation::filter_by_field(farms, FarmField::State, Some(state));
    group_aggregate_by(
        &in_state,
        |f| f.district.as_str(),
        &[NumericField::YieldVariancePercent],
    )
    .into_entries()
    .into_iter()
    .map(|(district, agg)| DistrictVariance {
        farms: agg.count,
        avg_variance: agg
            .average(NumericField::YieldVariancePercent)
            .unwrap_or_default(),
        district,
    })
    .collect()
}

/// Category distributions for the doughnut and radar charts
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Distributions {
    pub crop: GroupedBy<usize>,
    pub health: GroupedBy<usize>,
    pub soil: GroupedBy<usize>,
    pub irrigation: GroupedBy<usize>,
}

impl Distributions {
    pub fn compute(farms: &[&FarmRecord]) -> Self {
        let by = |field: FarmField| group_count_by(farms, |f| field.value_of(f));
        Self {
            crop: by(FarmField::CropType),
            health: by(FarmField::HealthStatus),
            soil: by(FarmField::SoilType),
            irrigation: by(FarmField::IrrigationType),
        }
    }
}

/// Monthly averages across every farm
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trends {
    pub ndvi: Vec<SeriesPoint>,
    pub soil_moisture: Vec<SeriesPoint>,
    pub temperature: Vec<SeriesPoint>,
    pub rainfall: Vec<SeriesPoint>,
}

impl Trends {
    pub fn compute(farms: &[&FarmRecord]) -> CoreResult<Self> {
        Ok(Self {
            ndvi: average_series_across(farms, SeriesKind::Ndvi)?,
            soil_moisture: average_series_across(farms, SeriesKind::SoilMoisture)?,
            temperature: average_series_across(farms, SeriesKind::Temperature)?,
            rainfall: average_series_across(farms, SeriesKind::Rainfall)?,
        })
    }
}

/// Crop health indicators derived from the latest trend values
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CropHealthIndex {
    /// Latest average NDVI × 100
    pub chlorophyll_index: f64,
    /// `(60 - latest average soil moisture) / 60`
    pub water_stress_index: f64,
    /// Share of farms not marked healthy, in percent
    pub disease_incidence: f64,
}

impl CropHealthIndex {
    pub fn compute(kpis: &KpiSummary, trends: &Trends) -> Self {
        let latest = |series: &[SeriesPoint]| series.last().map(|p| p.value);
        Self {
            chlorophyll_index: latest(&trends.ndvi).map_or(0.0, |v| v * 100.0),
            water_stress_index: latest(&trends.soil_moisture)
                .map_or(0.0, |v| (WATER_STRESS_CEILING - v) / WATER_STRESS_CEILING),
            disease_incidence: percent(kpis.total_farms - kpis.healthy_farms, kpis.total_farms),
        }
    }
}

/// Imagery quality counts over recent UAV scans
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SatelliteStats {
    pub recent_scans: usize,
    pub excellent_quality: usize,
    pub low_cloud_cover: usize,
    pub high_resolution: usize,
}

impl SatelliteStats {
    pub fn compute(farms: &[&FarmRecord], now: DateTime<Utc>) -> Self {
        let window = Duration::days(RECENT_SCAN_DAYS);
        let recent = count_where(farms, |f| now - f.last_uav_scan <= window);
        let share = |ratio: f64| (recent as f64 * ratio).floor() as usize;
        Self {
            recent_scans: recent,
            excellent_quality: share(0.8),
            low_cloud_cover: share(0.7),
            high_resolution: share(0.9),
        }
    }
}

/// Everything the main dashboard renders
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub kpis: KpiSummary,
    pub economics: EconomicSummary,
    pub risk: RiskSummary,
    pub states: Vec<StatePerformance>,
    pub distributions: Distributions,
    pub trends: Trends,
    pub crop_health: CropHealthIndex,
    pub satellite: SatelliteStats,
}

impl DashboardSummary {
    /// Summarise `farms` (the full collection or any filtered subset)
    pub fn build<T>(
        farms: &[T],
        pricing: &PricingAssumptions,
        now: DateTime<Utc>,
    ) -> CoreResult<Self>
    where
        T: std::borrow::Borrow<FarmRecord>,
    {
        let farms: Vec<&FarmRecord> = farms.iter().map(as_farm).collect();

        let kpis = KpiSummary::compute(&farms);
        let trends = Trends::compute(&farms)?;
        Ok(Self {
            economics: EconomicSummary::compute(&kpis, pricing)?,
            risk: RiskSummary::compute(&farms),
            states: state_performance(&farms),
            distributions: Distributions::compute(&farms),
            crop_health: CropHealthIndex::compute(&kpis, &trends),
            satellite: SatelliteStats::compute(&farms, now),
            trends,
            kpis,
        })
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

fn to_decimal(value: f64, field: &'static str) -> CoreResult<Decimal> {
    Decimal::try_from(value).map_err(|_| CoreError::NonFiniteTotal(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate_dataset;
    use chrono::TimeZone;

    #[test]
    fn test_percent_of_zero_is_zero() {
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(percent(1, 4), 25.0);
    }

    #[test]
    fn test_economics_from_totals() {
        let kpis = KpiSummary {
            total_farms: 2,
            total_area_hectares: 10.0,
            total_expected_yield: 9.0,
            total_predicted_yield: 8.5,
            healthy_farms: 1,
            healthy_percent: 50.0,
        };
        let econ = EconomicSummary::compute(&kpis, &PricingAssumptions::default()).unwrap();
        assert_eq!(econ.revenue_inr, Decimal::from(170_000));
        assert_eq!(econ.costs_inr, Decimal::from(50_000));
        assert_eq!(econ.profit_inr, Decimal::from(120_000));
        assert_eq!(econ.insurance_coverage_inr, Decimal::from(100_000));
    }

    #[test]
    fn test_empty_collection_summary_is_neutral() {
        let empty: Vec<FarmRecord> = Vec::new();
        let summary =
            DashboardSummary::build(&empty, &PricingAssumptions::default(), Utc::now()).unwrap();
        assert_eq!(summary.kpis.total_farms, 0);
        assert_eq!(summary.kpis.healthy_percent, 0.0);
        assert!(summary.states.is_empty());
        assert!(summary.trends.ndvi.is_empty());
        assert_eq!(summary.crop_health.chlorophyll_index, 0.0);
        assert_eq!(summary.crop_health.disease_incidence, 0.0);
        assert_eq!(summary.satellite.recent_scans, 0);
        assert_eq!(summary.economics.profit_inr, Decimal::ZERO);
    }

    #[test]
    fn test_economics_reject_non_finite_totals() {
        let kpis = KpiSummary {
            total_farms: 1,
            total_area_hectares: 3.0,
            total_expected_yield: 2.0,
            total_predicted_yield: f64::NAN,
            healthy_farms: 1,
            healthy_percent: 100.0,
        };
        let result = EconomicSummary::compute(&kpis, &PricingAssumptions::default());
        assert!(matches!(result, Err(CoreError::NonFiniteTotal("predictedYield"))));

        let kpis = KpiSummary {
            total_predicted_yield: 1.0,
            total_area_hectares: f64::INFINITY,
            ..kpis
        };
        let result = EconomicSummary::compute(&kpis, &PricingAssumptions::default());
        assert!(matches!(result, Err(CoreError::NonFiniteTotal("farmSize"))));
    }

    fn farms_fixture(now: DateTime<Utc>) -> Vec<FarmRecord> {
        generate_dataset(10, 21, now)
    }

    #[test]
    fn test_satellite_stats_window_and_shares() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let mut farms = farms_fixture(now);
        let offsets = [
            Duration::days(0),
            Duration::days(30),
            Duration::days(30) + Duration::seconds(1),
            Duration::days(45),
            Duration::days(-2),
            Duration::days(10),
            Duration::days(29),
            Duration::days(31),
            Duration::hours(12),
            Duration::days(5),
        ];
        for (farm, offset) in farms.iter_mut().zip(offsets) {
            farm.last_uav_scan = now - offset;
        }
        let refs: Vec<&FarmRecord> = farms.iter().collect();

        // Exactly 30 days back is still recent; a scan after `now` counts too
        let stats = SatelliteStats::compute(&refs, now);
        assert_eq!(stats.recent_scans, 7);
        assert_eq!(stats.excellent_quality, 5);
        assert_eq!(stats.low_cloud_cover, 4);
        assert_eq!(stats.high_resolution, 6);

        let stats = SatelliteStats::compute(&refs[..1], now);
        assert_eq!(
            stats,
            SatelliteStats {
                recent_scans: 1,
                excellent_quality: 0,
                low_cloud_cover: 0,
                high_resolution: 0,
            }
        );
    }

    #[test]
    fn test_crop_health_from_latest_trend_values() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let mut farms = farms_fixture(now);
        for (i, farm) in farms.iter_mut().enumerate() {
            farm.health_status = if i < 3 {
                HealthStatus::CriticalDisease
            } else {
                HealthStatus::Healthy
            };
            for point in farm.ndvi_history.iter_mut() {
                point.value = 0.5;
            }
            for point in farm.soil_moisture_history.iter_mut() {
                point.value = 45.0;
            }
        }
        farms[0].ndvi_history[11].value = 0.9;
        farms[1].soil_moisture_history[11].value = 15.0;
        let refs: Vec<&FarmRecord> = farms.iter().collect();

        let kpis = KpiSummary::compute(&refs);
        let trends = Trends::compute(&refs).unwrap();
        let health = CropHealthIndex::compute(&kpis, &trends);

        // Last NDVI mean: (0.9 + 9 * 0.5) / 10 = 0.54
        assert!((health.chlorophyll_index - 54.0).abs() < 1e-9);
        // Last soil moisture mean: (15 + 9 * 45) / 10 = 42
        assert!((health.water_stress_index - 0.3).abs() < 1e-9);
        assert!((health.disease_incidence - 30.0).abs() < 1e-9);
    }
}
