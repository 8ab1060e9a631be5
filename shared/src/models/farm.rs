//! Farm record models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{SeriesPoint, WeatherPoint};
use crate::types::Coordinates;

/// Version of the persisted farm record layout.
///
/// Version 1 lacked `farmSize`, `soilType`, `irrigationType` and
/// `weatherHistory`; those files are rejected on load.
pub const SCHEMA_VERSION: u32 = 2;

/// Number of monthly points in every history series
pub const HISTORY_MONTHS: usize = 12;

/// JSON keys every persisted record must carry
pub const FARM_RECORD_FIELDS: [&str; 19] = [
    "farmId",
    "farmerName",
    "state",
    "district",
    "village",
    "coordinates",
    "farmSize",
    "soilType",
    "irrigationType",
    "cropType",
    "sowingDate",
    "expectedYield",
    "predictedYield",
    "yieldVariancePercent",
    "healthStatus",
    "lastUAVScan",
    "ndviHistory",
    "soilMoistureHistory",
    "weatherHistory",
];

/// One synthetic farm with its location, yield figures and monthly histories
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FarmRecord {
    /// `FARM-` followed by 6 uppercase alphanumerics
    pub farm_id: String,
    pub farmer_name: String,
    pub state: String,
    pub district: String,
    pub village: String,
    pub coordinates: Coordinates,
    /// Hectares
    pub farm_size: f64,
    pub soil_type: SoilType,
    pub irrigation_type: IrrigationType,
    pub crop_type: CropType,
    pub sowing_date: DateTime<Utc>,
    /// Baseline yield in tons per hectare, always > 0
    pub expected_yield: f64,
    /// Never negative
    pub predicted_yield: f64,
    pub yield_variance_percent: f64,
    pub health_status: HealthStatus,
    #[serde(rename = "lastUAVScan")]
    pub last_uav_scan: DateTime<Utc>,
    pub ndvi_history: Vec<SeriesPoint>,
    pub soil_moisture_history: Vec<SeriesPoint>,
    pub weather_history: Vec<WeatherPoint>,
}

impl FarmRecord {
    /// Difference between predicted and expected yield (tons/ha)
    pub fn yield_gap(&self) -> f64 {
        self.predicted_yield - self.expected_yield
    }

    pub fn is_healthy(&self) -> bool {
        self.health_status == HealthStatus::Healthy
    }
}

/// Percentage deviation of predicted from expected yield.
///
/// Callers guarantee `expected > 0`; the generator never produces anything else.
pub fn yield_variance_percent(expected: f64, predicted: f64) -> f64 {
    (predicted - expected) / expected * 100.0
}

/// Crops tracked by the dashboard
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CropType {
    Wheat,
    Rice,
    Sugarcane,
    Cotton,
    Maize,
    Soybean,
    Pulses,
    Groundnut,
}

impl CropType {
    pub const ALL: [CropType; 8] = [
        CropType::Wheat,
        CropType::Rice,
        CropType::Sugarcane,
        CropType::Cotton,
        CropType::Maize,
        CropType::Soybean,
        CropType::Pulses,
        CropType::Groundnut,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CropType::Wheat => "Wheat",
            CropType::Rice => "Rice",
            CropType::Sugarcane => "Sugarcane",
            CropType::Cotton => "Cotton",
            CropType::Maize => "Maize",
            CropType::Soybean => "Soybean",
            CropType::Pulses => "Pulses",
            CropType::Groundnut => "Groundnut",
        }
    }
}

impl std::fmt::Display for CropType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Crop health as reported by the last UAV scan
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum HealthStatus {
    Healthy,
    #[serde(rename = "Stressed_Water")]
    StressedWater,
    #[serde(rename = "Stressed_Pest")]
    StressedPest,
    #[serde(rename = "Damaged_Weather")]
    DamagedWeather,
    #[serde(rename = "Critical_Disease")]
    CriticalDisease,
}

impl HealthStatus {
    pub const ALL: [HealthStatus; 5] = [
        HealthStatus::Healthy,
        HealthStatus::StressedWater,
        HealthStatus::StressedPest,
        HealthStatus::DamagedWeather,
        HealthStatus::CriticalDisease,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "Healthy",
            HealthStatus::StressedWater => "Stressed_Water",
            HealthStatus::StressedPest => "Stressed_Pest",
            HealthStatus::DamagedWeather => "Damaged_Weather",
            HealthStatus::CriticalDisease => "Critical_Disease",
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SoilType {
    Alluvial,
    Black,
    Red,
    Laterite,
    Arid,
    Mountain,
}

impl SoilType {
    pub const ALL: [SoilType; 6] = [
        SoilType::Alluvial,
        SoilType::Black,
        SoilType::Red,
        SoilType::Laterite,
        SoilType::Arid,
        SoilType::Mountain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Alluvial => "Alluvial",
            SoilType::Black => "Black",
            SoilType::Red => "Red",
            SoilType::Laterite => "Laterite",
            SoilType::Arid => "Arid",
            SoilType::Mountain => "Mountain",
        }
    }
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum IrrigationType {
    Canal,
    Tubewell,
    Drip,
    Sprinkler,
    Rainfed,
}

impl IrrigationType {
    pub const ALL: [IrrigationType; 5] = [
        IrrigationType::Canal,
        IrrigationType::Tubewell,
        IrrigationType::Drip,
        IrrigationType::Sprinkler,
        IrrigationType::Rainfed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IrrigationType::Canal => "Canal",
            IrrigationType::Tubewell => "Tubewell",
            IrrigationType::Drip => "Drip",
            IrrigationType::Sprinkler => "Sprinkler",
            IrrigationType::Rainfed => "Rainfed",
        }
    }
}

impl std::fmt::Display for IrrigationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_labels_round_trip() {
        for status in HealthStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            let back: HealthStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn test_crop_type_display() {
        assert_eq!(CropType::Groundnut.to_string(), "Groundnut");
        assert_eq!(CropType::ALL.len(), 8);
    }

    #[test]
    fn test_yield_variance_percent() {
        assert!((yield_variance_percent(4.0, 3.5) - (-12.5)).abs() < 1e-9);
        assert!((yield_variance_percent(2.5, 3.0) - 20.0).abs() < 1e-9);
        assert_eq!(yield_variance_percent(5.0, 5.0), 0.0);
    }
}
