//! Aggregation pipeline over farm records
//!
//! Every function here is a pure transformation of its input slice: nothing
//! is cached, nothing is mutated, and an empty collection produces the neutral
//! result (zero, an empty mapping or an empty series). Functions accept any
//! slice whose elements borrow as [`FarmRecord`], so the output of one filter
//! can be fed straight into the next stage without cloning records.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{CoreError, CoreResult};
use crate::models::{FarmRecord, SeriesKind, SeriesPoint};

// ============================================================================
// Field selectors
// ============================================================================

/// Categorical fields a collection can be filtered or grouped on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum FarmField {
    State,
    District,
    Village,
    CropType,
    HealthStatus,
    SoilType,
    IrrigationType,
}

impl FarmField {
    pub fn value_of<'a>(&self, farm: &'a FarmRecord) -> &'a str {
        match self {
            FarmField::State => &farm.state,
            FarmField::District => &farm.district,
            FarmField::Village => &farm.village,
            FarmField::CropType => farm.crop_type.as_str(),
            FarmField::HealthStatus => farm.health_status.as_str(),
            FarmField::SoilType => farm.soil_type.as_str(),
            FarmField::IrrigationType => farm.irrigation_type.as_str(),
        }
    }

    /// Accepts the record's JSON field names plus a few short aliases
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "state" => Some(FarmField::State),
            "district" => Some(FarmField::District),
            "village" => Some(FarmField::Village),
            "cropType" | "crop" => Some(FarmField::CropType),
            "healthStatus" | "health" => Some(FarmField::HealthStatus),
            "soilType" | "soil" => Some(FarmField::SoilType),
            "irrigationType" | "irrigation" => Some(FarmField::IrrigationType),
            _ => None,
        }
    }
}

/// Numeric fields that can be summed or averaged
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum NumericField {
    FarmSize,
    ExpectedYield,
    PredictedYield,
    YieldVariancePercent,
}

impl NumericField {
    pub fn value_of(&self, farm: &FarmRecord) -> f64 {
        match self {
            NumericField::FarmSize => farm.farm_size,
            NumericField::ExpectedYield => farm.expected_yield,
            NumericField::PredictedYield => farm.predicted_yield,
            NumericField::YieldVariancePercent => farm.yield_variance_percent,
        }
    }
}

// ============================================================================
// Ordered grouping result
// ============================================================================

/// Mapping from group key to value, iterated in first-occurrence order.
///
/// Serializes as a JSON object whose keys appear in that same order.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedBy<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for GroupedBy<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> GroupedBy<V> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_entries(self) -> Vec<(String, V)> {
        self.entries
    }

    /// Build by folding each item into the slot for its key
    fn fold<T, K, I, F>(items: &[T], key: K, init: I, mut update: F) -> Self
    where
        K: Fn(&T) -> &str,
        I: Fn() -> V,
        F: FnMut(&mut V, &T),
    {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut entries: Vec<(String, V)> = Vec::new();

        for item in items {
            let k = key(item);
            let slot = match index.get(k) {
                Some(&i) => i,
                None => {
                    entries.push((k.to_string(), init()));
                    index.insert(k.to_string(), entries.len() - 1);
                    entries.len() - 1
                }
            };
            update(&mut entries[slot].1, item);
        }

        Self { entries }
    }
}

impl<V: Serialize> Serialize for GroupedBy<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Count and per-field sums for one group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupAggregate {
    pub count: usize,
    pub sums: Vec<(NumericField, f64)>,
}

impl GroupAggregate {
    fn new(fields: &[NumericField]) -> Self {
        Self {
            count: 0,
            sums: fields.iter().map(|f| (*f, 0.0)).collect(),
        }
    }

    pub fn sum(&self, field: NumericField) -> Option<f64> {
        self.sums.iter().find(|(f, _)| *f == field).map(|(_, s)| *s)
    }

    /// `sum / count`; `None` if the field was not aggregated or the group is empty
    pub fn average(&self, field: NumericField) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        self.sum(field).map(|s| s / self.count as f64)
    }
}

// ============================================================================
// Pipeline operations
// ============================================================================

/// Typed view of any element that borrows as a record
pub(crate) fn as_farm<T: Borrow<FarmRecord>>(item: &T) -> &FarmRecord {
    item.borrow()
}

pub fn total_count<T>(items: &[T]) -> usize {
    items.len()
}

/// Sum a numeric projection across the collection
pub fn sum_by<T, F>(items: &[T], selector: F) -> f64
where
    F: Fn(&T) -> f64,
{
    items.iter().map(selector).sum()
}

pub fn count_where<T, P>(items: &[T], predicate: P) -> usize
where
    P: Fn(&T) -> bool,
{
    items.iter().filter(|&item| predicate(item)).count()
}

/// Count records per key; keys are exactly the values present, in first-seen order
pub fn group_count_by<T, K>(items: &[T], key: K) -> GroupedBy<usize>
where
    K: Fn(&T) -> &str,
{
    GroupedBy::fold(items, key, || 0, |count, _| *count += 1)
}

/// Count plus sums of `fields` per key
pub fn group_aggregate_by<T, K>(
    items: &[T],
    key: K,
    fields: &[NumericField],
) -> GroupedBy<GroupAggregate>
where
    T: Borrow<FarmRecord>,
    K: Fn(&T) -> &str,
{
    GroupedBy::fold(
        items,
        key,
        || GroupAggregate::new(fields),
        |agg, item| {
            let farm = as_farm(item);
            agg.count += 1;
            for (field, sum) in agg.sums.iter_mut() {
                *sum += field.value_of(farm);
            }
        },
    )
}

/// The first `n` items under `compare`, without touching the input.
///
/// The sort is stable, so items that compare equal keep their input order.
pub fn top_n<T, F>(items: &[T], compare: F, n: usize) -> Vec<&T>
where
    F: Fn(&T, &T) -> Ordering,
{
    let mut ranked: Vec<&T> = items.iter().collect();
    ranked.sort_by(|a, b| compare(*a, *b));
    ranked.truncate(n);
    ranked
}

/// Ascending comparator on yield variance percent
pub fn by_ascending_variance<T: Borrow<FarmRecord>>(a: &T, b: &T) -> Ordering {
    as_farm(a)
        .yield_variance_percent
        .total_cmp(&as_farm(b).yield_variance_percent)
}

/// Per-index mean of a monthly history across all records.
///
/// Every record must carry the same number of points as the first, with the
/// same dates; otherwise the collection is rejected. Dates of the result come
/// from the first record.
pub fn average_series_across<T>(items: &[T], kind: SeriesKind) -> CoreResult<Vec<SeriesPoint>>
where
    T: Borrow<FarmRecord>,
{
    let Some(first) = items.first() else {
        return Ok(Vec::new());
    };
    let reference = kind.points(as_farm(first));

    for item in items {
        let farm = as_farm(item);
        let len = kind.len_of(farm);
        if len != reference.len() {
            return Err(CoreError::MisalignedSeries {
                series: kind.as_str(),
                farm_id: farm.farm_id.clone(),
                expected: reference.len(),
                found: len,
            });
        }
        for (index, point) in reference.iter().enumerate() {
            if kind.point_at(farm, index).map(|p| p.date) != Some(point.date) {
                return Err(CoreError::MisalignedDates {
                    series: kind.as_str(),
                    farm_id: farm.farm_id.clone(),
                    index,
                });
            }
        }
    }

    let count = items.len() as f64;
    Ok(reference
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let total: f64 = items
                .iter()
                .filter_map(|item| kind.point_at(as_farm(item), index))
                .map(|p| p.value)
                .sum();
            SeriesPoint::new(point.date, total / count)
        })
        .collect())
}

/// Like [`average_series_across`] but tolerant of short histories: each index
/// averages only the records that have a point there.
pub fn average_series_across_lenient<T>(items: &[T], kind: SeriesKind) -> Vec<SeriesPoint>
where
    T: Borrow<FarmRecord>,
{
    let Some(first) = items.first() else {
        return Vec::new();
    };

    kind.points(as_farm(first))
        .into_iter()
        .enumerate()
        .map(|(index, point)| {
            let (total, present) = items
                .iter()
                .filter_map(|item| kind.point_at(as_farm(item), index))
                .fold((0.0, 0usize), |(t, n), p| (t + p.value, n + 1));
            // The first record always contributes, so `present >= 1`
            SeriesPoint::new(point.date, total / present.max(1) as f64)
        })
        .collect()
}

/// Records whose `field` equals `value`; an unset or empty value keeps everything
pub fn filter_by_field<'a, T>(
    items: &'a [T],
    field: FarmField,
    value: Option<&str>,
) -> Vec<&'a FarmRecord>
where
    T: Borrow<FarmRecord>,
{
    match value.filter(|v| !v.is_empty()) {
        None => items.iter().map(as_farm).collect(),
        Some(wanted) => items
            .iter()
            .map(as_farm)
            .filter(|farm| field.value_of(farm) == wanted)
            .collect(),
    }
}

/// Case-insensitive substring match on farmer name or village.
///
/// Only the empty term matches everything; whitespace is matched literally.
pub fn filter_by_search_term<'a, T>(items: &'a [T], term: &str) -> Vec<&'a FarmRecord>
where
    T: Borrow<FarmRecord>,
{
    let needle = term.to_lowercase();
    items
        .iter()
        .map(as_farm)
        .filter(|farm| matches_search(farm, &needle))
        .collect()
}

/// `needle` must already be lowercased
pub(crate) fn matches_search(farm: &FarmRecord, needle: &str) -> bool {
    needle.is_empty()
        || farm.farmer_name.to_lowercase().contains(needle)
        || farm.village.to_lowercase().contains(needle)
}

/// Slice `[(page - 1) * page_size, page * page_size)` clipped to the collection.
///
/// Page numbers below 1 are read as page 1. Re-clamping the page after a
/// filter change is the caller's job (see [`crate::report::clamp_page`]).
pub fn paginate<T>(items: &[T], page_size: usize, page: usize) -> CoreResult<&[T]> {
    if page_size == 0 {
        return Err(CoreError::InvalidPageSize);
    }
    let start = page
        .saturating_sub(1)
        .saturating_mul(page_size)
        .min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    Ok(&items[start..end])
}
