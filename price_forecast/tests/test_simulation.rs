mod common;

use approx::assert_relative_eq;
use chrono::{Datelike, Weekday};
use common::{at, base_features, daily_series};
use price_forecast::{DailyAggregate, DailySeries, FeatureSimulator, Horizon};
use rstest::rstest;

#[rstest]
#[case(0.01, 10)]
#[case(-0.005, 30)]
#[case(0.0, 1)]
#[case(0.02, 60)]
fn test_constant_growth_compounds(#[case] rate: f64, #[case] days: usize) {
    let series = daily_series(45, rate);
    let last = series.last().unwrap().features.nasdaq_index;

    let projection = FeatureSimulator::new(Horizon::new(days).unwrap())
        .simulate(&series, at(2023, 2, 15, 16))
        .unwrap();

    assert_eq!(projection.len(), days);
    assert_relative_eq!(projection.nasdaq_trend(), rate, epsilon = 1e-12);
    for (i, row) in projection.rows().iter().enumerate() {
        let expected = last * (1.0 + rate).powi(i as i32 + 1);
        assert_relative_eq!(row.features.nasdaq_index, expected, max_relative = 1e-12);
    }
}

#[test]
fn test_trend_uses_trailing_window_only() {
    // 40 flat days followed by 30 days growing 1%: only the growth is seen
    let start = chrono::NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    let rows = (0..70)
        .map(|i| {
            let nasdaq = if i < 40 {
                10_000.0
            } else {
                10_000.0 * 1.01f64.powi(i - 39)
            };
            DailyAggregate {
                date: start + chrono::Duration::days(i as i64),
                stock_price: 100.0,
                features: base_features(nasdaq),
            }
        })
        .collect();
    let series = DailySeries::new(rows);

    let projection = FeatureSimulator::new(Horizon::new(5).unwrap())
        .simulate(&series, at(2023, 3, 13, 16))
        .unwrap();

    assert_relative_eq!(projection.nasdaq_trend(), 0.01, epsilon = 1e-12);
    assert_relative_eq!(projection.sp500_trend(), 0.0, epsilon = 1e-12);
}

#[test]
fn test_other_covariates_carried_unchanged() {
    let series = daily_series(40, 0.01);
    let last = series.last().unwrap().features;

    let projection = FeatureSimulator::new(Horizon::default())
        .simulate(&series, at(2023, 2, 10, 16))
        .unwrap();

    for row in projection.rows() {
        assert_eq!(row.features.inflation_rate, last.inflation_rate);
        assert_eq!(row.features.unemployment_rate, last.unemployment_rate);
        assert_eq!(row.features.interest_rate, last.interest_rate);
        assert_eq!(row.features.market_sentiment, last.market_sentiment);
        // sp500 is flat in the fixture, so compounding leaves it unchanged
        assert_relative_eq!(row.features.sp500_index, last.sp500_index);
    }
}

#[rstest]
#[case(at(2023, 6, 2, 16))] // Friday
#[case(at(2023, 6, 3, 11))] // Saturday
#[case(at(2023, 6, 7, 9))] // Wednesday
fn test_future_timestamps_are_business_days(#[case] last_timestamp: chrono::NaiveDateTime) {
    let series = daily_series(35, 0.001);
    let projection = FeatureSimulator::new(Horizon::new(12).unwrap())
        .simulate(&series, last_timestamp)
        .unwrap();

    let timestamps = projection.timestamps();
    assert_eq!(timestamps.len(), 12);
    assert!(timestamps[0] > last_timestamp);
    assert!(timestamps.windows(2).all(|w| w[0] < w[1]));
    assert!(timestamps
        .iter()
        .all(|t| !matches!(t.weekday(), Weekday::Sat | Weekday::Sun)));
    assert!(timestamps.iter().all(|t| t.time() == last_timestamp.time()));

    // first projected day is the first weekday after the last timestamp
    let mut expected = last_timestamp + chrono::Duration::days(1);
    while matches!(expected.weekday(), Weekday::Sat | Weekday::Sun) {
        expected += chrono::Duration::days(1);
    }
    assert_eq!(timestamps[0], expected);
}

#[test]
fn test_single_day_history_propagates_nan() {
    let series = daily_series(1, 0.01);
    let projection = FeatureSimulator::new(Horizon::new(5).unwrap())
        .simulate(&series, at(2023, 1, 2, 16))
        .unwrap();

    assert!(projection.nasdaq_trend().is_nan());
    assert!(projection.sp500_trend().is_nan());
    assert!(projection
        .rows()
        .iter()
        .all(|r| r.features.nasdaq_index.is_nan() && r.features.sp500_index.is_nan()));
    // the held covariates are still defined
    assert!(projection
        .rows()
        .iter()
        .all(|r| r.features.interest_rate == 5.25));
}

#[test]
fn test_missing_index_values_propagate_nan() {
    let start = chrono::NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    let rows = (0..30)
        .map(|i| {
            let mut features = base_features(10_000.0 + i as f64);
            features.sp500_index = f64::NAN;
            DailyAggregate {
                date: start + chrono::Duration::days(i),
                stock_price: 100.0,
                features,
            }
        })
        .collect();
    let series = DailySeries::new(rows);

    let projection = FeatureSimulator::new(Horizon::new(3).unwrap())
        .simulate(&series, at(2023, 1, 31, 16))
        .unwrap();

    assert!(projection.sp500_trend().is_nan());
    assert!(projection.rows().iter().all(|r| r.features.sp500_index.is_nan()));
    assert!(projection.rows().iter().all(|r| r.features.nasdaq_index.is_finite()));
}

#[test]
fn test_custom_trend_window() {
    let series = daily_series(60, 0.01);
    let simulator = FeatureSimulator::new(Horizon::new(2).unwrap())
        .with_trend_window(2)
        .unwrap();
    assert_eq!(simulator.trend_window(), 2);

    let projection = simulator.simulate(&series, at(2023, 3, 2, 16)).unwrap();
    assert_relative_eq!(projection.nasdaq_trend(), 0.01, epsilon = 1e-12);
}

#[test]
fn test_matrix_follows_training_order() {
    let series = daily_series(31, 0.0);
    let projection = FeatureSimulator::new(Horizon::new(4).unwrap())
        .simulate(&series, at(2023, 2, 1, 16))
        .unwrap();

    let matrix = projection.to_matrix();
    assert_eq!(matrix.len(), 4);
    assert_eq!(
        matrix.columns(),
        &price_forecast::FEATURE_COLUMNS.map(String::from)
    );
    assert_eq!(matrix.rows()[0], base_features(10_000.0).to_array().to_vec());
}

#[test]
fn test_missing_latest_covariate_is_carried_as_nan() {
    let mut series_rows = daily_series(10, 0.01).rows().to_vec();
    if let Some(last) = series_rows.last_mut() {
        last.features.interest_rate = f64::NAN;
    }
    let series = DailySeries::new(series_rows);
    assert!(series.last().unwrap().features.has_nan());

    let projection = FeatureSimulator::new(Horizon::new(3).unwrap())
        .simulate(&series, at(2023, 1, 13, 16))
        .unwrap();

    assert!(projection.rows().iter().all(|r| r.features.interest_rate.is_nan()));
    assert!(projection.rows().iter().all(|r| r.features.nasdaq_index.is_finite()));
}

#[test]
fn test_gap_in_window_counts_as_flat_day() {
    // 100 -> gap -> 121 -> 133.1: padded changes are 0.0, 0.21 and 0.10
    let start = chrono::NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    let rows = [100.0, f64::NAN, 121.0, 133.1]
        .into_iter()
        .enumerate()
        .map(|(i, nasdaq)| DailyAggregate {
            date: start + chrono::Duration::days(i as i64),
            stock_price: 100.0,
            features: base_features(nasdaq),
        })
        .collect();
    let series = DailySeries::new(rows);

    let projection = FeatureSimulator::new(Horizon::new(1).unwrap())
        .simulate(&series, at(2023, 1, 5, 16))
        .unwrap();

    assert_relative_eq!(projection.nasdaq_trend(), 0.31 / 3.0, epsilon = 1e-9);
}
