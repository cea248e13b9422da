//! # Stock Outlook
//!
//! Facade over the workspace libraries:
//!
//! - [`math`]: NaN-aware means, percentage changes, compounding and the
//!   business-day calendar
//! - [`forecast`]: loading, daily aggregation, feature simulation, models and
//!   the prediction table
//!
//! ## Example
//!
//! ```
//! use stock_outlook_workspace::math::{next_business_day, CompoundingProjection};
//! use chrono::NaiveDate;
//!
//! let path = CompoundingProjection::new(100.0, 0.01).path(2);
//! assert!((path[1] - 102.01).abs() < 1e-9);
//!
//! let friday = NaiveDate::from_ymd_opt(2023, 3, 31)
//!     .unwrap()
//!     .and_hms_opt(16, 0, 0)
//!     .unwrap();
//! let monday = next_business_day(friday).unwrap();
//! assert_eq!(monday.date(), NaiveDate::from_ymd_opt(2023, 4, 3).unwrap());
//! ```

pub use outlook_math as math;
pub use price_forecast as forecast;

pub use price_forecast::{ForecastError, ForecastSession, Horizon, OutlookConfig, PredictionTable};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facade_exposes_default_horizon() {
        assert_eq!(Horizon::default().days(), 30);
        assert_eq!(OutlookConfig::default().horizon, Horizon::default());
    }

    #[test]
    fn facade_reaches_math_kernels() {
        assert!(math::nan_mean(&[]).is_nan());
        assert_eq!(math::nan_mean(&[1.0, f64::NAN, 3.0]), 2.0);
    }
}
