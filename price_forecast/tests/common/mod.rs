#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use price_forecast::models::{LinearRegressor, ModelArtifact};
use price_forecast::{DailyAggregate, DailySeries, FeatureRow, FEATURE_COLUMNS};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempDir};

pub const HEADER: &str = "timestamp,stock_price,nasdaq_index,sp500_index,inflation_rate,unemployment_rate,interest_rate,market_sentiment";

pub fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

pub fn base_features(nasdaq: f64) -> FeatureRow {
    FeatureRow {
        nasdaq_index: nasdaq,
        sp500_index: 4000.0,
        inflation_rate: 3.1,
        unemployment_rate: 3.7,
        interest_rate: 5.25,
        market_sentiment: 0.6,
    }
}

/// Write raw CSV lines (without header) to a temp file
pub fn csv_file(lines: &[String]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();
    file
}

/// A CSV line for one observation
pub fn observation(timestamp: NaiveDateTime, price: f64, features: &FeatureRow) -> String {
    format!(
        "{},{},{},{},{},{},{},{}",
        timestamp.format("%d-%m-%Y %H:%M"),
        price,
        features.nasdaq_index,
        features.sp500_index,
        features.inflation_rate,
        features.unemployment_rate,
        features.interest_rate,
        features.market_sentiment
    )
}

/// One observation per calendar day at 16:00, nasdaq growing by `growth` a day
pub fn daily_lines(start: NaiveDateTime, days: usize, growth: f64) -> Vec<String> {
    (0..days)
        .map(|i| {
            let nasdaq = 10_000.0 * (1.0 + growth).powi(i as i32);
            observation(
                start + Duration::days(i as i64),
                150.0 + i as f64,
                &base_features(nasdaq),
            )
        })
        .collect()
}

/// Daily series on consecutive dates with nasdaq growing by `growth`
pub fn daily_series(days: usize, growth: f64) -> DailySeries {
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    DailySeries::new(
        (0..days)
            .map(|i| DailyAggregate {
                date: start + Duration::days(i as i64),
                stock_price: 150.0 + i as f64,
                features: base_features(10_000.0 * (1.0 + growth).powi(i as i32)),
            })
            .collect(),
    )
}

/// Linear model returning `nasdaq_index` unchanged
pub fn nasdaq_passthrough() -> ModelArtifact {
    ModelArtifact::Linear(
        LinearRegressor::new(0.0, vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0])
            .with_feature_names(FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect()),
    )
}

/// Save a model artifact into `dir` and return its path
pub fn save_model(dir: &TempDir, artifact: &ModelArtifact) -> PathBuf {
    let path = dir.path().join("model.json");
    artifact.save(&path).unwrap();
    path
}

pub fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| l.to_string())
        .collect()
}
