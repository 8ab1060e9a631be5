//! Monthly time-series models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single monthly observation (NDVI, soil moisture, or an averaged trend)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SeriesPoint {
    pub date: DateTime<Utc>,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(date: DateTime<Utc>, value: f64) -> Self {
        Self { date, value }
    }
}

/// Monthly weather observation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WeatherPoint {
    pub date: DateTime<Utc>,
    /// Degrees Celsius
    pub temperature: f64,
    /// Millimetres
    pub rainfall: f64,
}

/// Selects which per-farm history an averaged trend is computed from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Ndvi,
    SoilMoisture,
    Temperature,
    Rainfall,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 4] = [
        SeriesKind::Ndvi,
        SeriesKind::SoilMoisture,
        SeriesKind::Temperature,
        SeriesKind::Rainfall,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesKind::Ndvi => "ndvi",
            SeriesKind::SoilMoisture => "soil_moisture",
            SeriesKind::Temperature => "temperature",
            SeriesKind::Rainfall => "rainfall",
        }
    }

    /// Parse the path/query spelling (`ndvi`, `soil_moisture`, ...)
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }

    /// Project a farm's history onto `(date, value)` points for this kind
    pub fn points(&self, farm: &super::FarmRecord) -> Vec<SeriesPoint> {
        match self {
            SeriesKind::Ndvi => farm.ndvi_history.clone(),
            SeriesKind::SoilMoisture => farm.soil_moisture_history.clone(),
            SeriesKind::Temperature => farm
                .weather_history
                .iter()
                .map(|w| SeriesPoint::new(w.date, w.temperature))
                .collect(),
            SeriesKind::Rainfall => farm
                .weather_history
                .iter()
                .map(|w| SeriesPoint::new(w.date, w.rainfall))
                .collect(),
        }
    }

    /// Length of the underlying history without materialising it
    pub fn len_of(&self, farm: &super::FarmRecord) -> usize {
        match self {
            SeriesKind::Ndvi => farm.ndvi_history.len(),
            SeriesKind::SoilMoisture => farm.soil_moisture_history.len(),
            SeriesKind::Temperature | SeriesKind::Rainfall => farm.weather_history.len(),
        }
    }

    /// Point at `index`, if the history is long enough
    pub fn point_at(&self, farm: &super::FarmRecord, index: usize) -> Option<SeriesPoint> {
        match self {
            SeriesKind::Ndvi => farm.ndvi_history.get(index).cloned(),
            SeriesKind::SoilMoisture => farm.soil_moisture_history.get(index).cloned(),
            SeriesKind::Temperature => farm
                .weather_history
                .get(index)
                .map(|w| SeriesPoint::new(w.date, w.temperature)),
            SeriesKind::Rainfall => farm
                .weather_history
                .get(index)
                .map(|w| SeriesPoint::new(w.date, w.rainfall)),
        }
    }
}

impl std::fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
