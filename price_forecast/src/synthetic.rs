//! Synthetic sample data
//!
//! Produces an hourly dataset in the expected CSV layout together with a
//! linear model artifact whose coefficients match the generating process,
//! so the whole pipeline can be exercised without external files.

use crate::error::{ForecastError, Result};
use crate::features::{FeatureRow, FEATURE_COLUMNS, TIMESTAMP_FORMAT};
use crate::models::{LinearRegressor, ModelArtifact};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use log::info;
use outlook_math::is_business_day;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::Serialize;
use std::path::Path;

/// Trading hours sampled per day, inclusive
const FIRST_HOUR: u32 = 9;
const LAST_HOUR: u32 = 16;

/// Weights of the generating process, in `FEATURE_COLUMNS` order
const TRUE_INTERCEPT: f64 = 20.0;
const TRUE_COEFFICIENTS: [f64; 6] = [0.004, 0.01, -1.5, -2.0, -3.0, 10.0];

/// One row of the generated CSV
#[derive(Debug, Clone, Serialize)]
struct SampleRecord {
    timestamp: String,
    stock_price: f64,
    nasdaq_index: f64,
    sp500_index: f64,
    inflation_rate: f64,
    unemployment_rate: f64,
    interest_rate: f64,
    market_sentiment: f64,
}

/// Settings for the sample generator
#[derive(Debug, Clone)]
pub struct SampleDataset {
    /// Business days to generate
    pub days: usize,
    /// First calendar day considered
    pub start: NaiveDate,
    /// RNG seed
    pub seed: u64,
}

impl Default for SampleDataset {
    fn default() -> Self {
        Self {
            days: 120,
            start: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap_or_default(),
            seed: 42,
        }
    }
}

impl SampleDataset {
    /// Generate and write the hourly CSV to `path`, returning the row count
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        if self.days == 0 {
            return Err(ForecastError::InvalidParameter(
                "Sample dataset needs at least one day".to_string(),
            ));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let shock = normal(0.004)?;
        let drift = normal(0.0005)?;
        let noise = normal(0.5)?;

        let mut features = FeatureRow {
            nasdaq_index: 13_000.0,
            sp500_index: 4_000.0,
            inflation_rate: 3.2,
            unemployment_rate: 3.8,
            interest_rate: 5.25,
            market_sentiment: 0.55,
        };

        let mut writer = csv::Writer::from_path(path.as_ref())?;
        let mut rows = 0;
        let mut day = self.start;
        let mut generated_days = 0;

        while generated_days < self.days {
            let midnight = day.and_hms_opt(0, 0, 0).unwrap_or_default();
            if is_business_day(midnight) {
                for hour in FIRST_HOUR..=LAST_HOUR {
                    features.nasdaq_index *= 1.0 + 0.0008 + shock.sample(&mut rng);
                    features.sp500_index *= 1.0 + 0.0005 + shock.sample(&mut rng);
                    features.inflation_rate += drift.sample(&mut rng);
                    features.unemployment_rate += drift.sample(&mut rng);
                    features.market_sentiment =
                        (features.market_sentiment + drift.sample(&mut rng) * 10.0).clamp(0.0, 1.0);

                    let timestamp: NaiveDateTime = midnight + Duration::hours(hour as i64);
                    writer.serialize(SampleRecord {
                        timestamp: timestamp.format(TIMESTAMP_FORMAT).to_string(),
                        stock_price: true_price(&features) + noise.sample(&mut rng),
                        nasdaq_index: features.nasdaq_index,
                        sp500_index: features.sp500_index,
                        inflation_rate: features.inflation_rate,
                        unemployment_rate: features.unemployment_rate,
                        interest_rate: features.interest_rate,
                        market_sentiment: features.market_sentiment,
                    })?;
                    rows += 1;
                }
                generated_days += 1;
            }
            day = day.succ_opt().ok_or_else(|| {
                ForecastError::DataError(format!("Calendar overflow after {}", day))
            })?;
        }

        writer.flush()?;
        info!(
            "Wrote {} sample observations over {} days to {}",
            rows,
            self.days,
            path.as_ref().display()
        );
        Ok(rows)
    }
}

/// Linear model matching the sample generator
pub fn sample_model() -> ModelArtifact {
    ModelArtifact::Linear(
        LinearRegressor::new(TRUE_INTERCEPT, TRUE_COEFFICIENTS.to_vec())
            .with_feature_names(FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect()),
    )
}

fn true_price(features: &FeatureRow) -> f64 {
    TRUE_INTERCEPT
        + features
            .to_array()
            .iter()
            .zip(TRUE_COEFFICIENTS)
            .map(|(x, w)| x * w)
            .sum::<f64>()
}

fn normal(std_dev: f64) -> Result<Normal<f64>> {
    Normal::new(0.0, std_dev)
        .map_err(|e| ForecastError::InvalidParameter(format!("Bad noise level: {}", e)))
}
