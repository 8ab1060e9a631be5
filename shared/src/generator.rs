//! Synthetic farm dataset generator
//!
//! Every random draw comes from the generator's own PRNG and every timestamp
//! is derived from the generation instant it was built with, so a fixed seed
//! and instant always reproduce the same collection.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Months, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::{FIRST_NAMES, LAST_NAMES, STATES, VILLAGES};
use crate::models::{
    yield_variance_percent, CropType, FarmRecord, HealthStatus, IrrigationType, SeriesPoint,
    SoilType, WeatherPoint, HISTORY_MONTHS,
};
use crate::types::{round_to, Coordinates};

/// Record count used when nothing else is configured
pub const DEFAULT_RECORD_COUNT: usize = 1000;

const FARM_ID_PREFIX: &str = "FARM-";
const FARM_ID_LEN: usize = 6;
const FARM_ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

const EXPECTED_YIELD_RANGE: (f64, f64) = (2.5, 6.5);
const YIELD_VARIANCE_RANGE: (f64, f64) = (-0.5, 0.5);
const FARM_SIZE_RANGE: (f64, f64) = (0.5, 20.0);
const NDVI_RANGE: (f64, f64) = (0.2, 0.9);
const SOIL_MOISTURE_RANGE: (f64, f64) = (20.0, 60.0);
const TEMPERATURE_RANGE: (f64, f64) = (15.0, 40.0);
const RAINFALL_RANGE: (f64, f64) = (0.0, 200.0);

const SOWING_WINDOW_DAYS: i64 = 365;
const UAV_SCAN_WINDOW_DAYS: i64 = 30;

const PROGRESS_INTERVAL: usize = 1000;

/// Produces [`FarmRecord`]s from an explicit random source
pub struct FarmGenerator<R: Rng> {
    rng: R,
    now: DateTime<Utc>,
    months: Vec<DateTime<Utc>>,
    enforce_unique_ids: bool,
    issued_ids: HashSet<String>,
}

impl FarmGenerator<StdRng> {
    /// Deterministic generator: same seed and instant give identical output
    pub fn seeded(seed: u64, now: DateTime<Utc>) -> Self {
        Self::new(StdRng::seed_from_u64(seed), now)
    }

    pub fn from_entropy(now: DateTime<Utc>) -> Self {
        Self::new(StdRng::from_entropy(), now)
    }
}

impl<R: Rng> FarmGenerator<R> {
    pub fn new(rng: R, now: DateTime<Utc>) -> Self {
        Self {
            rng,
            now,
            months: monthly_stamps(now),
            enforce_unique_ids: true,
            issued_ids: HashSet::new(),
        }
    }

    /// Toggle rejection sampling of already issued farm ids (on by default)
    pub fn with_unique_ids(mut self, enforce: bool) -> Self {
        self.enforce_unique_ids = enforce;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Generate `count` independent farms; zero yields an empty collection
    pub fn generate(&mut self, count: usize) -> Vec<FarmRecord> {
        let mut farms = Vec::with_capacity(count);
        for i in 0..count {
            if i % PROGRESS_INTERVAL == 0 && i > 0 {
                tracing::info!("Generated {} farms...", i);
            }
            farms.push(self.generate_farm());
        }
        farms
    }

    /// Generate a single farm record
    pub fn generate_farm(&mut self) -> FarmRecord {
        let farm_id = self.next_farm_id();
        let farmer_name = format!(
            "{} {}",
            pick(&mut self.rng, FIRST_NAMES),
            pick(&mut self.rng, LAST_NAMES)
        );

        let state = STATES[self.rng.gen_range(0..STATES.len())];
        let district = pick(&mut self.rng, state.districts);
        let village = pick(&mut self.rng, VILLAGES);
        let lat = self.uniform((state.bounds.lat_min, state.bounds.lat_max), 4);
        let lng = self.uniform((state.bounds.lng_min, state.bounds.lng_max), 4);
        let farm_size = self.uniform(FARM_SIZE_RANGE, 2);

        let expected_yield = self.uniform(EXPECTED_YIELD_RANGE, 1);
        let variance = self.uniform(YIELD_VARIANCE_RANGE, 1);
        let predicted_yield = round_to((expected_yield + variance).max(0.0), 1);

        let crop_type = *pick(&mut self.rng, &CropType::ALL);
        let soil_type = *pick(&mut self.rng, &SoilType::ALL);
        let irrigation_type = *pick(&mut self.rng, &IrrigationType::ALL);
        let health_status = *pick(&mut self.rng, &HealthStatus::ALL);

        let sowing_date = self.recent_instant(SOWING_WINDOW_DAYS);
        let last_uav_scan = self.recent_instant(UAV_SCAN_WINDOW_DAYS);

        let ndvi_history = self.monthly_series(NDVI_RANGE, 2);
        let soil_moisture_history = self.monthly_series(SOIL_MOISTURE_RANGE, 1);
        let weather_history = self.weather_series();

        FarmRecord {
            farm_id,
            farmer_name,
            state: state.name.to_string(),
            district: district.to_string(),
            village: village.to_string(),
            coordinates: Coordinates::new(lat, lng),
            farm_size,
            soil_type,
            irrigation_type,
            crop_type,
            sowing_date,
            expected_yield,
            predicted_yield,
            yield_variance_percent: yield_variance_percent(expected_yield, predicted_yield),
            health_status,
            last_uav_scan,
            ndvi_history,
            soil_moisture_history,
            weather_history,
        }
    }

    fn next_farm_id(&mut self) -> String {
        loop {
            let suffix: String = (0..FARM_ID_LEN)
                .map(|_| FARM_ID_ALPHABET[self.rng.gen_range(0..FARM_ID_ALPHABET.len())] as char)
                .collect();
            let id = format!("{}{}", FARM_ID_PREFIX, suffix);

            if !self.enforce_unique_ids {
                return id;
            }
            if self.issued_ids.insert(id.clone()) {
                return id;
            }
            tracing::debug!(farm_id = %id, "Farm id collision, redrawing");
        }
    }

    fn uniform(&mut self, (min, max): (f64, f64), decimals: i32) -> f64 {
        round_to(self.rng.gen_range(min..=max), decimals)
    }

    /// Instant uniformly within the last `days` days
    fn recent_instant(&mut self, days: i64) -> DateTime<Utc> {
        let offset = self.rng.gen_range(0..=days * 86_400);
        self.now - Duration::seconds(offset)
    }

    fn monthly_series(&mut self, range: (f64, f64), decimals: i32) -> Vec<SeriesPoint> {
        let months = self.months.clone();
        months
            .into_iter()
            .map(|date| SeriesPoint::new(date, self.uniform(range, decimals)))
            .collect()
    }

    fn weather_series(&mut self) -> Vec<WeatherPoint> {
        let months = self.months.clone();
        months
            .into_iter()
            .map(|date| WeatherPoint {
                date,
                temperature: self.uniform(TEMPERATURE_RANGE, 1),
                rainfall: self.uniform(RAINFALL_RANGE, 1),
            })
            .collect()
    }
}

/// Generate `count` farms from a seed, stamped relative to `now`
pub fn generate_dataset(count: usize, seed: u64, now: DateTime<Utc>) -> Vec<FarmRecord> {
    FarmGenerator::seeded(seed, now).generate(count)
}

/// The 12 month stamps shared by every history: 11 months back through `now`.
///
/// Day-of-month is clamped when the target month is shorter.
fn monthly_stamps(now: DateTime<Utc>) -> Vec<DateTime<Utc>> {
    (0..HISTORY_MONTHS)
        .map(|i| {
            let back = (HISTORY_MONTHS - 1 - i) as u32;
            now.checked_sub_months(Months::new(back))
                .unwrap_or_else(|| now - Duration::days(31 * i64::from(back)))
        })
        .collect()
}

fn pick<'a, T, R: Rng>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}
