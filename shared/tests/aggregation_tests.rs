//! Aggregation pipeline integration tests
//!
//! Tests for the pipeline operations including:
//! - Group counts and first-occurrence ordering
//! - Bottom-N ranking with stable tie-breaks
//! - Averaged time series (strict and lenient)
//! - Filtering, search and pagination
//! - Idempotence over an unmodified collection

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use shared::generator::generate_dataset;
use shared::report::{bottom_performers, clamp_page, report_page, ReportFilter};
use shared::{
    average_series_across, average_series_across_lenient, by_ascending_variance, count_where,
    filter_by_field, filter_by_search_term, group_aggregate_by, group_count_by, paginate, sum_by,
    top_n, total_count, CoreError, FarmField, FarmRecord, NumericField, Pagination, SeriesKind,
};

fn generation_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap()
}

fn sample(count: usize) -> Vec<FarmRecord> {
    generate_dataset(count, 7, generation_instant())
}

/// Sample farms with the given variance percentages, in order
fn with_variances(variances: &[f64]) -> Vec<FarmRecord> {
    sample(variances.len())
        .into_iter()
        .zip(variances)
        .map(|(mut farm, v)| {
            farm.yield_variance_percent = *v;
            farm
        })
        .collect()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_group_count_by_state_sums_to_total() {
        let farms = sample(1000);
        let by_state = group_count_by(&farms, |f| f.state.as_str());
        assert_eq!(by_state.values().sum::<usize>(), 1000);
        assert!(by_state.len() <= 15);
    }

    #[test]
    fn test_group_keys_are_exactly_present_values() {
        let farms = sample(200);
        let by_crop = group_count_by(&farms, |f| f.crop_type.as_str());
        for (crop, count) in by_crop.iter() {
            assert_eq!(*count, count_where(&farms, |f| f.crop_type.as_str() == crop));
        }
        let first_seen = farms[0].crop_type.as_str();
        assert_eq!(by_crop.keys().next(), Some(first_seen));
    }

    #[test]
    fn test_filter_then_group_yields_single_key() {
        let farms = sample(1000);
        let kerala = filter_by_field(&farms, FarmField::State, Some("Kerala"));
        let grouped = group_count_by(&kerala, |f| f.state.as_str());
        let k = count_where(&farms, |f| f.state == "Kerala");

        if k == 0 {
            assert!(grouped.is_empty());
        } else {
            assert_eq!(grouped.len(), 1);
            assert_eq!(grouped.get("Kerala"), Some(&k));
        }
    }

    #[test]
    fn test_unset_filter_is_identity() {
        let farms = sample(40);
        assert_eq!(filter_by_field(&farms, FarmField::State, None).len(), 40);
        assert_eq!(filter_by_field(&farms, FarmField::CropType, Some("")).len(), 40);
        assert_eq!(filter_by_search_term(&farms, "").len(), 40);
    }

    #[test]
    fn test_search_term_whitespace_is_not_trimmed() {
        let mut farms = sample(2);
        farms[0].farmer_name = "Ravi Nair".into();
        farms[0].village = "Sonpur".into();
        farms[1].farmer_name = "Priya Rao".into();
        farms[1].village = "Rampur".into();

        assert!(filter_by_search_term(&farms, "nair ").is_empty());
        assert_eq!(filter_by_search_term(&farms, "ravi nair").len(), 1);
        assert_eq!(filter_by_search_term(&farms, " rao").len(), 1);
    }

    #[test]
    fn test_search_is_case_insensitive_on_name_or_village() {
        let mut farms = sample(3);
        farms[0].farmer_name = "Priya Sharma".into();
        farms[0].village = "Rampur".into();
        farms[1].farmer_name = "Amit Verma".into();
        farms[1].village = "Sharmapur".into();
        farms[2].farmer_name = "Ravi Nair".into();
        farms[2].village = "Sonpur".into();

        let hits = filter_by_search_term(&farms, "sHaRmA");
        let ids: Vec<_> = hits.iter().map(|f| f.farm_id.as_str()).collect();
        assert_eq!(ids, vec![farms[0].farm_id.as_str(), farms[1].farm_id.as_str()]);
        assert!(filter_by_search_term(&farms, "nobody").is_empty());
    }

    #[test]
    fn test_bottom_two_of_three_keeps_tied_order() {
        let farms = with_variances(&[-10.0, 5.0, -10.0]);
        let bottom = top_n(&farms, by_ascending_variance, 2);
        assert_eq!(bottom.len(), 2);
        assert_eq!(bottom[0].farm_id, farms[0].farm_id);
        assert_eq!(bottom[1].farm_id, farms[2].farm_id);
    }

    #[test]
    fn test_bottom_hundred_sorted_and_sized() {
        let farms = sample(1000);
        let bottom = bottom_performers(&farms, 100);
        assert_eq!(bottom.len(), 100);
        assert!(bottom
            .windows(2)
            .all(|w| w[0].yield_variance_percent <= w[1].yield_variance_percent));

        let small = sample(30);
        assert_eq!(bottom_performers(&small, 100).len(), 30);
    }

    #[test]
    fn test_top_n_does_not_reorder_input() {
        let farms = sample(50);
        let before: Vec<_> = farms.iter().map(|f| f.farm_id.clone()).collect();
        let _ = top_n(&farms, by_ascending_variance, 10);
        let after: Vec<_> = farms.iter().map(|f| f.farm_id.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_average_series_of_empty_is_empty() {
        let empty: Vec<FarmRecord> = Vec::new();
        assert!(average_series_across(&empty, SeriesKind::Ndvi).unwrap().is_empty());
        assert!(average_series_across_lenient(&empty, SeriesKind::Rainfall).is_empty());
    }

    #[test]
    fn test_average_series_means_per_index() {
        let mut farms = sample(2);
        for (i, point) in farms[0].ndvi_history.iter_mut().enumerate() {
            point.value = 0.2 + i as f64 * 0.01;
        }
        for point in farms[1].ndvi_history.iter_mut() {
            point.value = 0.6;
        }

        let trend = average_series_across(&farms, SeriesKind::Ndvi).unwrap();
        assert_eq!(trend.len(), 12);
        for (i, point) in trend.iter().enumerate() {
            let expected = (0.2 + i as f64 * 0.01 + 0.6) / 2.0;
            assert!((point.value - expected).abs() < 1e-12);
            assert_eq!(point.date, farms[0].ndvi_history[i].date);
        }
    }

    #[test]
    fn test_misaligned_history_is_rejected_or_skipped() {
        let mut farms = sample(3);
        farms[2].weather_history.truncate(10);

        let strict = average_series_across(&farms, SeriesKind::Temperature);
        assert!(matches!(
            strict,
            Err(CoreError::MisalignedSeries { expected: 12, found: 10, .. })
        ));

        let lenient = average_series_across_lenient(&farms, SeriesKind::Temperature);
        assert_eq!(lenient.len(), 12);
        let last_two = (farms[0].weather_history[11].temperature
            + farms[1].weather_history[11].temperature)
            / 2.0;
        assert!((lenient[11].value - last_two).abs() < 1e-12);
    }

    #[test]
    fn test_shifted_dates_are_rejected() {
        let mut farms = sample(2);
        farms[1].ndvi_history[4].date += Duration::days(1);

        let result = average_series_across(&farms, SeriesKind::Ndvi);
        match result {
            Err(CoreError::MisalignedDates { series, farm_id, index }) => {
                assert_eq!(series, "ndvi");
                assert_eq!(farm_id, farms[1].farm_id);
                assert_eq!(index, 4);
            }
            other => panic!("expected MisalignedDates, got {:?}", other),
        }

        // Other series of the same records are still aligned
        assert_eq!(average_series_across(&farms, SeriesKind::SoilMoisture).unwrap().len(), 12);
    }

    #[test]
    fn test_group_aggregate_by_state_matches_sums() {
        let farms = sample(300);
        let by_state = group_aggregate_by(
            &farms,
            |f| f.state.as_str(),
            &[NumericField::FarmSize, NumericField::PredictedYield],
        );
        let total_area: f64 = by_state
            .values()
            .map(|agg| agg.sum(NumericField::FarmSize).unwrap())
            .sum();
        assert!((total_area - sum_by(&farms, |f| f.farm_size)).abs() < 1e-6);

        for (state, agg) in by_state.iter() {
            let members = filter_by_field(&farms, FarmField::State, Some(state));
            assert_eq!(agg.count, members.len());
            let avg = agg.average(NumericField::PredictedYield).unwrap();
            let expected = sum_by(&members, |f| f.predicted_yield) / members.len() as f64;
            assert!((avg - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_paginate_and_clamp_after_filter() {
        let farms = sample(95);
        assert_eq!(paginate(&farms, 10, 10).unwrap().len(), 5);
        assert!(paginate(&farms, 10, 11).unwrap().is_empty());

        let filter = ReportFilter {
            state: Some(farms[0].state.clone()),
            ..Default::default()
        };
        let matching = filter.apply(&farms).len();
        let page = report_page(&farms, &filter, &Pagination { page: 50, per_page: 10 }).unwrap();
        assert_eq!(page.pagination.page as usize, clamp_page(50, matching, 10));
        assert_eq!(page.pagination.total_items as usize, matching);
        assert!(!page.data.is_empty());
        assert!(page.data.iter().all(|f| f.state == farms[0].state));
    }

    #[test]
    fn test_report_page_rejects_zero_page_size() {
        let farms = sample(5);
        let result = report_page(&farms, &ReportFilter::default(), &Pagination { page: 1, per_page: 0 });
        assert!(matches!(result, Err(CoreError::InvalidPageSize)));
    }

    #[test]
    fn test_total_count() {
        assert_eq!(total_count(&sample(12)), 12);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        /// Property: grouping partitions the collection
        #[test]
        fn prop_group_counts_partition(count in 0usize..300, seed in any::<u64>()) {
            let farms = generate_dataset(count, seed, generation_instant());
            let by_health = group_count_by(&farms, |f| f.health_status.as_str());
            prop_assert_eq!(by_health.values().sum::<usize>(), count);
        }

        /// Property: bottom-N is sorted, sized min(n, len), and stable on ties
        #[test]
        fn prop_bottom_n_sorted_and_stable(
            variances in prop::collection::vec(-3i32..3, 0..60),
            n in 0usize..80
        ) {
            let values: Vec<f64> = variances.iter().map(|v| *v as f64 * 5.0).collect();
            let farms = with_variances(&values);
            let bottom = top_n(&farms, by_ascending_variance, n);

            prop_assert_eq!(bottom.len(), n.min(farms.len()));
            for pair in bottom.windows(2) {
                prop_assert!(pair[0].yield_variance_percent <= pair[1].yield_variance_percent);
                if pair[0].yield_variance_percent == pair[1].yield_variance_percent {
                    let pos = |id: &str| farms.iter().position(|f| f.farm_id == id).unwrap();
                    prop_assert!(pos(&pair[0].farm_id) < pos(&pair[1].farm_id));
                }
            }
        }

        /// Property: every operation is idempotent on unchanged input
        #[test]
        fn prop_operations_idempotent(seed in any::<u64>()) {
            let farms = generate_dataset(80, seed, generation_instant());

            prop_assert_eq!(
                group_count_by(&farms, |f| f.crop_type.as_str()),
                group_count_by(&farms, |f| f.crop_type.as_str())
            );
            prop_assert_eq!(
                average_series_across(&farms, SeriesKind::SoilMoisture).unwrap(),
                average_series_across(&farms, SeriesKind::SoilMoisture).unwrap()
            );
            prop_assert_eq!(
                top_n(&farms, by_ascending_variance, 10),
                top_n(&farms, by_ascending_variance, 10)
            );
            prop_assert_eq!(
                filter_by_search_term(&farms, "an"),
                filter_by_search_term(&farms, "an")
            );
        }

        /// Property: a page never exceeds the page size and pages tile the collection
        #[test]
        fn prop_pages_tile_collection(len in 0usize..120, per_page in 1usize..25) {
            let items: Vec<usize> = (0..len).collect();
            let mut rebuilt = Vec::new();
            let pages = shared::report::total_pages(len, per_page);
            for page in 1..=pages {
                let slice = paginate(&items, per_page, page).unwrap();
                prop_assert!(slice.len() <= per_page);
                rebuilt.extend_from_slice(slice);
            }
            prop_assert_eq!(rebuilt, items);
        }
    }
}
