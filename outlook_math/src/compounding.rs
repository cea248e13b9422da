//! Geometric compounding of a daily growth rate

use serde::{Deserialize, Serialize};

/// A value grown forward at a fixed per-period rate.
///
/// The rate is estimated once and never re-estimated along the path, so the
/// value after `i` periods is `last * (1 + rate)^i`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompoundingProjection {
    /// Last observed value
    pub last: f64,
    /// Growth per period, as a fraction (0.01 = 1%)
    pub rate: f64,
}

impl CompoundingProjection {
    /// Create a projection starting from `last` growing at `rate` per period
    pub fn new(last: f64, rate: f64) -> Self {
        Self { last, rate }
    }

    /// Projected value `periods` steps ahead
    pub fn value_at(&self, periods: u32) -> f64 {
        self.last * (1.0 + self.rate).powi(periods as i32)
    }

    /// Projected values for steps `1..=periods`
    pub fn path(&self, periods: usize) -> Vec<f64> {
        (1..=periods as u32).map(|i| self.value_at(i)).collect()
    }

    /// Whether the rate is usable; a `NaN` rate poisons the whole path
    pub fn is_defined(&self) -> bool {
        !self.rate.is_nan() && !self.last.is_nan()
    }
}
