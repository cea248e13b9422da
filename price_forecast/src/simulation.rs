//! Projecting the last known covariates onto future business days
//!
//! The two market indices grow at the mean daily percentage change of a
//! trailing window, compounded. The remaining four covariates are carried
//! forward unchanged.

use crate::data::DailySeries;
use crate::error::{ForecastError, Result};
use crate::features::{FeatureMatrix, FeatureRow};
use chrono::NaiveDateTime;
use log::{debug, warn};
use outlook_math::{business_days_after, mean_pct_change, CompoundingProjection};
use serde::{Deserialize, Serialize};

/// Number of future business days to project
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Horizon(usize);

impl Horizon {
    /// Shortest horizon
    pub const MIN: usize = 1;
    /// Longest horizon
    pub const MAX: usize = 60;
    /// Horizon used when none is chosen
    pub const DEFAULT: usize = 30;

    /// Create a horizon, rejecting values outside `[MIN, MAX]`
    pub fn new(days: usize) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&days) {
            return Err(ForecastError::InvalidParameter(format!(
                "Horizon must be between {} and {} business days, got {}",
                Self::MIN,
                Self::MAX,
                days
            )));
        }
        Ok(Self(days))
    }

    /// Create a horizon, clamping into `[MIN, MAX]`
    pub fn clamped(days: usize) -> Self {
        Self(days.clamp(Self::MIN, Self::MAX))
    }

    /// Number of days
    pub fn days(&self) -> usize {
        self.0
    }
}

impl Default for Horizon {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<usize> for Horizon {
    type Error = ForecastError;

    fn try_from(days: usize) -> Result<Self> {
        Self::new(days)
    }
}

impl From<Horizon> for usize {
    fn from(horizon: Horizon) -> usize {
        horizon.0
    }
}

/// One future business day and its simulated covariates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionRow {
    pub timestamp: NaiveDateTime,
    pub features: FeatureRow,
}

/// Simulated covariates for every day of the horizon
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    rows: Vec<ProjectionRow>,
    nasdaq_trend: f64,
    sp500_trend: f64,
}

impl Projection {
    /// Projected rows, in timestamp order
    pub fn rows(&self) -> &[ProjectionRow] {
        &self.rows
    }

    /// Future timestamps
    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.rows.iter().map(|r| r.timestamp).collect()
    }

    /// Mean daily percentage change applied to `nasdaq_index`
    pub fn nasdaq_trend(&self) -> f64 {
        self.nasdaq_trend
    }

    /// Mean daily percentage change applied to `sp500_index`
    pub fn sp500_trend(&self) -> f64 {
        self.sp500_trend
    }

    /// Model input built from the projected covariates
    pub fn to_matrix(&self) -> FeatureMatrix {
        let features: Vec<FeatureRow> = self.rows.iter().map(|r| r.features).collect();
        FeatureMatrix::from_feature_rows(&features)
    }

    /// Number of projected days
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether nothing was projected
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Simulates future covariates from a daily series
#[derive(Debug, Clone, Copy)]
pub struct FeatureSimulator {
    horizon: Horizon,
    trend_window: usize,
}

impl FeatureSimulator {
    /// Trailing days used to estimate index growth
    pub const DEFAULT_TREND_WINDOW: usize = 30;

    /// Create a simulator with the default trend window
    pub fn new(horizon: Horizon) -> Self {
        Self {
            horizon,
            trend_window: Self::DEFAULT_TREND_WINDOW,
        }
    }

    /// Use a different trailing window for the growth estimate
    pub fn with_trend_window(mut self, days: usize) -> Result<Self> {
        if days == 0 {
            return Err(ForecastError::InvalidParameter(
                "Trend window must be positive".to_string(),
            ));
        }
        self.trend_window = days;
        Ok(self)
    }

    /// Horizon being simulated
    pub fn horizon(&self) -> Horizon {
        self.horizon
    }

    /// Trailing window length
    pub fn trend_window(&self) -> usize {
        self.trend_window
    }

    /// Project `series` forward from `last_timestamp`.
    ///
    /// When the trailing window holds fewer than two usable points the
    /// growth rate is `NaN` and so is every projected value of that index.
    pub fn simulate(
        &self,
        series: &DailySeries,
        last_timestamp: NaiveDateTime,
    ) -> Result<Projection> {
        let last = series.last().ok_or(ForecastError::EmptyDataset)?;
        let window = series.tail(self.trend_window);

        let nasdaq: Vec<f64> = window.iter().map(|r| r.features.nasdaq_index).collect();
        let sp500: Vec<f64> = window.iter().map(|r| r.features.sp500_index).collect();
        let nasdaq_trend = mean_pct_change(&nasdaq);
        let sp500_trend = mean_pct_change(&sp500);
        let nasdaq_growth = CompoundingProjection::new(last.features.nasdaq_index, nasdaq_trend);
        let sp500_growth = CompoundingProjection::new(last.features.sp500_index, sp500_trend);

        if !nasdaq_growth.is_defined() {
            warn!("nasdaq_index cannot be projected from the last {} days", window.len());
        }
        if !sp500_growth.is_defined() {
            warn!("sp500_index cannot be projected from the last {} days", window.len());
        }
        if last.features.has_nan() {
            warn!("Latest daily row on {} has missing covariates", last.date);
        }
        debug!(
            "Index trends: nasdaq {:.4}%/day, sp500 {:.4}%/day",
            nasdaq_trend * 100.0,
            sp500_trend * 100.0
        );

        let days = self.horizon.days();
        let timestamps = business_days_after(last_timestamp, days)?;
        let nasdaq_path = nasdaq_growth.path(days);
        let sp500_path = sp500_growth.path(days);

        let rows = timestamps
            .into_iter()
            .zip(nasdaq_path.into_iter().zip(sp500_path))
            .map(|(timestamp, (nasdaq_index, sp500_index))| ProjectionRow {
                timestamp,
                features: FeatureRow {
                    nasdaq_index,
                    sp500_index,
                    ..last.features
                },
            })
            .collect();

        Ok(Projection {
            rows,
            nasdaq_trend,
            sp500_trend,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizon_bounds() {
        assert!(Horizon::new(0).is_err());
        assert!(Horizon::new(61).is_err());
        assert_eq!(Horizon::new(1).unwrap().days(), 1);
        assert_eq!(Horizon::new(60).unwrap().days(), 60);
        assert_eq!(Horizon::default().days(), 30);
    }

    #[test]
    fn test_horizon_clamped() {
        assert_eq!(Horizon::clamped(0).days(), 1);
        assert_eq!(Horizon::clamped(500).days(), 60);
        assert_eq!(Horizon::clamped(12).days(), 12);
    }

    #[test]
    fn test_horizon_deserialize_validates() {
        let ok: Horizon = serde_json::from_str("15").unwrap();
        assert_eq!(ok.days(), 15);
        assert!(serde_json::from_str::<Horizon>("0").is_err());
    }

    #[test]
    fn test_zero_trend_window_rejected() {
        let simulator = FeatureSimulator::new(Horizon::default());
        assert!(simulator.with_trend_window(0).is_err());
    }

    #[test]
    fn test_empty_series_rejected() {
        let simulator = FeatureSimulator::new(Horizon::default());
        let ts = chrono::NaiveDate::from_ymd_opt(2023, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let result = simulator.simulate(&DailySeries::default(), ts);
        assert!(matches!(result, Err(ForecastError::EmptyDataset)));
    }
}
