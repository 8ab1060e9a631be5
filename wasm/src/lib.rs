//! WebAssembly module for the GeoYIELD dashboard
//!
//! Runs the aggregation pipeline in the browser over the fetched
//! `farmData.json`:
//! - Dashboard summary and state breakdowns
//! - Report table pages and bottom performers
//! - Averaged monthly trends
//! - Farm id and yield helpers
//!
//! Every export takes the dataset as the JSON text the loader fetched and
//! returns JSON text.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use shared::dashboard::{self, DashboardSummary, PricingAssumptions};
use shared::dataset::load_dataset_from_str;
use shared::report::{self, ReportFilter};
use shared::{average_series_across, FarmRecord, Pagination, SeriesKind};

/// Summary for the whole dashboard. `now_ms` defaults to `Date.now()`.
#[wasm_bindgen]
pub fn dashboard_summary(farms_json: &str, now_ms: Option<f64>) -> Result<String, JsValue> {
    let now_ms = now_ms.unwrap_or_else(js_sys::Date::now);
    summary_json(farms_json, now_ms).map_err(to_js)
}

/// One page of the report table, filtered by state, crop and search term
#[wasm_bindgen]
pub fn report_page(
    farms_json: &str,
    state: Option<String>,
    crop: Option<String>,
    search: Option<String>,
    page: u32,
    per_page: u32,
) -> Result<String, JsValue> {
    let filter = ReportFilter {
        state,
        crop_type: crop,
        search,
    };
    report_page_json(farms_json, &filter, &Pagination { page, per_page }).map_err(to_js)
}

/// The `n` farms with the lowest yield variance
#[wasm_bindgen]
pub fn bottom_performers(farms_json: &str, n: usize) -> Result<String, JsValue> {
    bottom_json(farms_json, n).map_err(to_js)
}

/// Averaged `ndvi`, `soil_moisture`, `temperature` or `rainfall` series
#[wasm_bindgen]
pub fn average_series(farms_json: &str, series: &str) -> Result<String, JsValue> {
    average_series_json(farms_json, series).map_err(to_js)
}

#[wasm_bindgen]
pub fn state_performance(farms_json: &str) -> Result<String, JsValue> {
    state_performance_json(farms_json).map_err(to_js)
}

#[wasm_bindgen]
pub fn district_variance(farms_json: &str, state: &str) -> Result<String, JsValue> {
    district_variance_json(farms_json, state).map_err(to_js)
}

/// Check the `FARM-XXXXXX` id format
#[wasm_bindgen]
pub fn validate_farm_id(farm_id: &str) -> bool {
    shared::validate_farm_id(farm_id).is_ok()
}

/// Percentage deviation of predicted from expected yield; 0 when expected is not positive
#[wasm_bindgen]
pub fn yield_variance_percent(expected: f64, predicted: f64) -> f64 {
    if expected <= 0.0 {
        return 0.0;
    }
    shared::yield_variance_percent(expected, predicted)
}

fn to_js(message: String) -> JsValue {
    web_sys::console::warn_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

fn parse(farms_json: &str) -> Result<Vec<FarmRecord>, String> {
    load_dataset_from_str(farms_json).map_err(|e| format!("Invalid farm data: {}", e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn summary_json(farms_json: &str, now_ms: f64) -> Result<String, String> {
    let farms = parse(farms_json)?;
    let now: DateTime<Utc> = Utc
        .timestamp_millis_opt(now_ms as i64)
        .single()
        .ok_or_else(|| format!("Invalid timestamp: {}", now_ms))?;
    let summary = DashboardSummary::build(&farms, &PricingAssumptions::default(), now)
        .map_err(|e| e.to_string())?;
    to_json(&summary)
}

fn report_page_json(
    farms_json: &str,
    filter: &ReportFilter,
    pagination: &Pagination,
) -> Result<String, String> {
    let farms = parse(farms_json)?;
    let page = report::report_page(&farms, filter, pagination).map_err(|e| e.to_string())?;
    to_json(&page)
}

fn bottom_json(farms_json: &str, n: usize) -> Result<String, String> {
    let farms = parse(farms_json)?;
    to_json(&report::bottom_performers(&farms, n))
}

fn average_series_json(farms_json: &str, series: &str) -> Result<String, String> {
    let kind = SeriesKind::parse(series).ok_or_else(|| format!("Unknown series: {}", series))?;
    let farms = parse(farms_json)?;
    let points = average_series_across(&farms, kind).map_err(|e| e.to_string())?;
    to_json(&points)
}

fn state_performance_json(farms_json: &str) -> Result<String, String> {
    let farms = parse(farms_json)?;
    let refs: Vec<&FarmRecord> = farms.iter().collect();
    to_json(&dashboard::state_performance(&refs))
}

fn district_variance_json(farms_json: &str, state: &str) -> Result<String, String> {
    let farms = parse(farms_json)?;
    to_json(&dashboard::district_variance(&farms, state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use shared::dataset::dataset_to_string;
    use shared::generator::generate_dataset;

    const NOW_MS: f64 = 1_735_689_600_000.0; // 2025-01-01T00:00:00Z

    fn farms_json(count: usize) -> (Vec<FarmRecord>, String) {
        let now = Utc.timestamp_millis_opt(NOW_MS as i64).unwrap();
        let farms = generate_dataset(count, 77, now);
        let json = dataset_to_string(&farms, false).unwrap();
        (farms, json)
    }

    #[test]
    fn test_validate_farm_id() {
        assert!(validate_farm_id("FARM-9Q2ZK1"));
        assert!(!validate_farm_id("FARM-9q2zk1"));
        assert!(!validate_farm_id("9Q2ZK1"));
    }

    #[test]
    fn test_yield_variance_percent() {
        assert!((yield_variance_percent(4.0, 3.0) - (-25.0)).abs() < 1e-9);
        assert_eq!(yield_variance_percent(0.0, 3.0), 0.0);
    }

    #[test]
    fn test_dashboard_summary_counts_all_farms() {
        let (_, json) = farms_json(40);
        let summary: Value = serde_json::from_str(&summary_json(&json, NOW_MS).unwrap()).unwrap();
        assert_eq!(summary["kpis"]["totalFarms"], 40);
        assert_eq!(summary["trends"]["rainfall"].as_array().unwrap().len(), 12);
    }

    #[test]
    fn test_report_page_is_clamped() {
        let (_, json) = farms_json(23);
        let out = report_page_json(
            &json,
            &ReportFilter::default(),
            &Pagination { page: 10, per_page: 10 },
        )
        .unwrap();
        let page: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(page["pagination"]["page"], 3);
        assert_eq!(page["data"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_bottom_performers_sorted() {
        let (farms, json) = farms_json(30);
        let rows: Vec<FarmRecord> = serde_json::from_str(&bottom_json(&json, 5).unwrap()).unwrap();
        assert_eq!(rows.len(), 5);
        let lowest = farms
            .iter()
            .map(|f| f.yield_variance_percent)
            .fold(f64::INFINITY, f64::min);
        assert_eq!(rows[0].yield_variance_percent, lowest);
    }

    #[test]
    fn test_average_series_rejects_unknown_kind() {
        let (_, json) = farms_json(3);
        assert!(average_series_json(&json, "humidity").is_err());
        let points: Value = serde_json::from_str(&average_series_json(&json, "NDVI").unwrap()).unwrap();
        assert_eq!(points.as_array().unwrap().len(), 12);
    }

    #[test]
    fn test_state_and_district_breakdowns() {
        let (farms, json) = farms_json(60);
        let states: Value = serde_json::from_str(&state_performance_json(&json).unwrap()).unwrap();
        let total: u64 = states
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["farms"].as_u64().unwrap())
            .sum();
        assert_eq!(total, 60);

        let districts: Value =
            serde_json::from_str(&district_variance_json(&json, &farms[0].state).unwrap()).unwrap();
        assert!(!districts.as_array().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let err = bottom_json("{not json", 3).unwrap_err();
        assert!(err.starts_with("Invalid farm data"));
    }
}
