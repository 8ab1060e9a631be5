//! Validation utilities for GeoYIELD farm data
//!
//! The loader runs these before handing a collection to the pipeline so that
//! a malformed record fails fast instead of leaking NaN into aggregates.

use std::collections::HashSet;

use crate::catalog::find_state;
use crate::error::{CoreError, CoreResult};
use crate::models::{FarmRecord, SeriesKind, HISTORY_MONTHS};

/// Tolerance for recomputed floating-point fields
const FLOAT_TOLERANCE: f64 = 1e-6;

// ============================================================================
// Field Validations
// ============================================================================

/// Validate farm id format: `FARM-` followed by 6 uppercase alphanumerics
pub fn validate_farm_id(farm_id: &str) -> Result<(), &'static str> {
    let Some(suffix) = farm_id.strip_prefix("FARM-") else {
        return Err("Farm id must start with 'FARM-'");
    };
    if suffix.len() != 6 {
        return Err("Farm id must have 6 characters after 'FARM-'");
    }
    if !suffix
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        return Err("Farm id must be uppercase alphanumeric only");
    }
    Ok(())
}

/// Expected yield must be a finite, strictly positive number
pub fn validate_expected_yield(value: f64) -> Result<(), &'static str> {
    if !value.is_finite() {
        return Err("Expected yield must be a finite number");
    }
    if value <= 0.0 {
        return Err("Expected yield must be greater than zero");
    }
    Ok(())
}

/// Predicted yield must be finite and never negative
pub fn validate_predicted_yield(value: f64) -> Result<(), &'static str> {
    if !value.is_finite() {
        return Err("Predicted yield must be a finite number");
    }
    if value < 0.0 {
        return Err("Predicted yield cannot be negative");
    }
    Ok(())
}

// ============================================================================
// Record Validations
// ============================================================================

/// Check one record against every schema invariant
pub fn validate_record(farm: &FarmRecord) -> CoreResult<()> {
    let id = farm.farm_id.as_str();
    let invalid = |field: &'static str, reason: &str| CoreError::invalid(id, field, reason);

    validate_farm_id(id).map_err(|msg| invalid("farmId", msg))?;

    let state = find_state(&farm.state).ok_or_else(|| invalid("state", "is not a known state"))?;
    if !state.has_district(&farm.district) {
        return Err(invalid("district", "does not belong to the record's state"));
    }

    if !farm.coordinates.is_finite() {
        return Err(invalid("coordinates", "must be finite"));
    }
    if !state.bounds.contains(&farm.coordinates) {
        return Err(invalid("coordinates", "lie outside the state's bounding box"));
    }

    if !farm.farm_size.is_finite() || farm.farm_size <= 0.0 {
        return Err(invalid("farmSize", "must be a positive number"));
    }

    validate_expected_yield(farm.expected_yield).map_err(|msg| invalid("expectedYield", msg))?;
    validate_predicted_yield(farm.predicted_yield).map_err(|msg| invalid("predictedYield", msg))?;

    let recomputed = crate::models::yield_variance_percent(farm.expected_yield, farm.predicted_yield);
    if !farm.yield_variance_percent.is_finite()
        || (farm.yield_variance_percent - recomputed).abs() > FLOAT_TOLERANCE
    {
        return Err(invalid(
            "yieldVariancePercent",
            "does not match (predicted - expected) / expected * 100",
        ));
    }

    validate_histories(farm)
}

/// Every history has 12 points with strictly increasing, shared dates
fn validate_histories(farm: &FarmRecord) -> CoreResult<()> {
    for kind in [SeriesKind::Ndvi, SeriesKind::SoilMoisture, SeriesKind::Temperature] {
        let len = kind.len_of(farm);
        if len != HISTORY_MONTHS {
            return Err(CoreError::MisalignedSeries {
                series: kind.as_str(),
                farm_id: farm.farm_id.clone(),
                expected: HISTORY_MONTHS,
                found: len,
            });
        }
    }

    let reference = SeriesKind::Ndvi.points(farm);
    if !reference.windows(2).all(|w| w[0].date < w[1].date) {
        return Err(CoreError::invalid(
            &farm.farm_id,
            "ndviHistory",
            "dates must be strictly increasing",
        ));
    }

    for kind in [SeriesKind::SoilMoisture, SeriesKind::Temperature] {
        for (index, point) in kind.points(farm).iter().enumerate() {
            if point.date != reference[index].date {
                return Err(CoreError::MisalignedDates {
                    series: kind.as_str(),
                    farm_id: farm.farm_id.clone(),
                    index,
                });
            }
            if !point.value.is_finite() {
                return Err(CoreError::invalid(&farm.farm_id, "history", "values must be finite"));
            }
        }
    }
    if reference.iter().any(|p| !p.value.is_finite())
        || farm.weather_history.iter().any(|w| !w.rainfall.is_finite())
    {
        return Err(CoreError::invalid(&farm.farm_id, "history", "values must be finite"));
    }

    Ok(())
}

// ============================================================================
// Collection Validations
// ============================================================================

/// All records share the first record's history dates
pub fn validate_series_alignment(farms: &[FarmRecord]) -> CoreResult<()> {
    let Some(first) = farms.first() else {
        return Ok(());
    };
    let reference = SeriesKind::Ndvi.points(first);

    for farm in farms {
        for kind in SeriesKind::ALL {
            let points = kind.points(farm);
            if points.len() != reference.len() {
                return Err(CoreError::MisalignedSeries {
                    series: kind.as_str(),
                    farm_id: farm.farm_id.clone(),
                    expected: reference.len(),
                    found: points.len(),
                });
            }
            if let Some(index) = points
                .iter()
                .zip(&reference)
                .position(|(a, b)| a.date != b.date)
            {
                return Err(CoreError::MisalignedDates {
                    series: kind.as_str(),
                    farm_id: farm.farm_id.clone(),
                    index,
                });
            }
        }
    }
    Ok(())
}

/// Validate every record, id uniqueness and cross-record alignment
pub fn validate_dataset(farms: &[FarmRecord]) -> CoreResult<()> {
    let mut seen = HashSet::with_capacity(farms.len());
    for farm in farms {
        validate_record(farm)?;
        if !seen.insert(farm.farm_id.as_str()) {
            return Err(CoreError::DuplicateFarmId(farm.farm_id.clone()));
        }
    }
    validate_series_alignment(farms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_farm_id_valid() {
        assert!(validate_farm_id("FARM-A1B2C3").is_ok());
        assert!(validate_farm_id("FARM-000000").is_ok());
        assert!(validate_farm_id("FARM-ZZZZZZ").is_ok());
    }

    #[test]
    fn test_validate_farm_id_invalid() {
        assert!(validate_farm_id("FARM-a1b2c3").is_err()); // Lowercase
        assert!(validate_farm_id("FARM-A1B2C").is_err()); // Too short
        assert!(validate_farm_id("FARM-A1B2C3D").is_err()); // Too long
        assert!(validate_farm_id("PLOT-A1B2C3").is_err()); // Wrong prefix
        assert!(validate_farm_id("FARM-A1-2C3").is_err()); // Special char
    }

    #[test]
    fn test_validate_yields() {
        assert!(validate_expected_yield(2.5).is_ok());
        assert!(validate_expected_yield(0.0).is_err());
        assert!(validate_expected_yield(f64::NAN).is_err());
        assert!(validate_predicted_yield(0.0).is_ok());
        assert!(validate_predicted_yield(-0.1).is_err());
        assert!(validate_predicted_yield(f64::INFINITY).is_err());
    }

    #[test]
    fn test_empty_dataset_is_valid() {
        assert!(validate_dataset(&[]).is_ok());
        assert!(validate_series_alignment(&[]).is_ok());
    }
}
