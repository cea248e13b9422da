//! # Outlook Math
//!
//! Numeric building blocks for projecting stock-price features forward.
//! Everything here works on plain `f64` slices and treats `NaN` as a
//! missing value: it is skipped where a mean is taken and propagated
//! everywhere else.

use thiserror::Error;

pub mod calendar;
pub mod compounding;
pub mod returns;
pub mod stats;

pub use calendar::{business_days_after, is_business_day, next_business_day};
pub use compounding::CompoundingProjection;
pub use returns::{forward_fill, mean_pct_change, pct_change};
pub use stats::{nan_mean, tail};

/// Errors that can occur in outlook calculations
#[derive(Error, Debug)]
pub enum MathError {
    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for outlook math operations
pub type Result<T> = std::result::Result<T, MathError>;
