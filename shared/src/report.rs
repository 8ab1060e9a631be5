//! Report view: filtered, paginated farm listings and bottom performers

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

use crate::aggregation::{
    as_farm, by_ascending_variance, filter_by_field, matches_search, paginate, top_n, FarmField,
};
use crate::error::CoreResult;
use crate::models::FarmRecord;
use crate::types::{PaginatedResponse, Pagination, PaginationMeta};

/// Farms listed in the "bottom performers" table
pub const DEFAULT_BOTTOM_N: usize = 100;

/// Filter selection owned by the presentation layer.
///
/// Unset or empty fields do not filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReportFilter {
    pub state: Option<String>,
    pub crop_type: Option<String>,
    pub search: Option<String>,
}

impl ReportFilter {
    /// State, crop and search filters applied in one pass, input order kept
    pub fn apply<'a, T>(&self, farms: &'a [T]) -> Vec<&'a FarmRecord>
    where
        T: Borrow<FarmRecord>,
    {
        let crop = self.crop_type.as_deref().filter(|c| !c.is_empty());
        let needle = self.search.as_deref().unwrap_or_default().to_lowercase();
        filter_by_field(farms, FarmField::State, self.state.as_deref())
            .into_iter()
            .filter(|farm| crop.map_or(true, |c| FarmField::CropType.value_of(farm) == c))
            .filter(|farm| matches_search(farm, &needle))
            .collect()
    }
}

/// Number of pages needed for `total_items`; zero items still means zero pages
pub fn total_pages(total_items: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total_items.div_ceil(per_page)
}

/// Clamp a requested page into `[1, max(1, total_pages)]`
pub fn clamp_page(page: usize, total_items: usize, per_page: usize) -> usize {
    page.clamp(1, total_pages(total_items, per_page).max(1))
}

/// Filter, clamp the page and slice: the whole report table pipeline
pub fn report_page<T>(
    farms: &[T],
    filter: &ReportFilter,
    pagination: &Pagination,
) -> CoreResult<PaginatedResponse<FarmRecord>>
where
    T: Borrow<FarmRecord>,
{
    let per_page = pagination.per_page as usize;
    let filtered = filter.apply(farms);
    let page = clamp_page(pagination.page as usize, filtered.len(), per_page);
    let rows = paginate(&filtered, per_page, page)?;

    Ok(PaginatedResponse {
        data: rows.iter().map(|f| (*f).clone()).collect(),
        pagination: PaginationMeta {
            page: page as u32,
            per_page: pagination.per_page,
            total_items: filtered.len() as u64,
            total_pages: total_pages(filtered.len(), per_page) as u32,
        },
    })
}

/// The `n` farms with the lowest yield variance, ties in input order
pub fn bottom_performers<T>(farms: &[T], n: usize) -> Vec<&FarmRecord>
where
    T: Borrow<FarmRecord>,
{
    top_n(farms, by_ascending_variance, n)
        .into_iter()
        .map(as_farm)
        .collect()
}

/// Flat row for tabular/CSV export of a farm
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FarmReportRow {
    pub farm_id: String,
    pub farmer_name: String,
    pub state: String,
    pub district: String,
    pub village: String,
    pub crop_type: String,
    pub health_status: String,
    pub farm_size: f64,
    pub expected_yield: f64,
    pub predicted_yield: f64,
    pub yield_variance_percent: f64,
}

impl From<&FarmRecord> for FarmReportRow {
    fn from(farm: &FarmRecord) -> Self {
        Self {
            farm_id: farm.farm_id.clone(),
            farmer_name: farm.farmer_name.clone(),
            state: farm.state.clone(),
            district: farm.district.clone(),
            village: farm.village.clone(),
            crop_type: farm.crop_type.to_string(),
            health_status: farm.health_status.to_string(),
            farm_size: farm.farm_size,
            expected_yield: farm.expected_yield,
            predicted_yield: farm.predicted_yield,
            yield_variance_percent: farm.yield_variance_percent,
        }
    }
}

/// Single-farm detail view
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FarmDetail {
    pub farm: FarmRecord,
    /// Predicted minus expected yield (tons/ha)
    pub yield_gap: f64,
}

pub fn find_farm<'a, T>(farms: &'a [T], farm_id: &str) -> Option<&'a FarmRecord>
where
    T: Borrow<FarmRecord>,
{
    farms
        .iter()
        .map(as_farm)
        .find(|f| f.farm_id == farm_id)
}

pub fn farm_detail<T>(farms: &[T], farm_id: &str) -> Option<FarmDetail>
where
    T: Borrow<FarmRecord>,
{
    find_farm(farms, farm_id).map(|farm| FarmDetail {
        yield_gap: farm.yield_gap(),
        farm: farm.clone(),
    })
}
