//! Day-over-day percentage changes

use crate::stats::nan_mean;

/// Percentage change between consecutive values, `x[t] / x[t-1] - 1`.
///
/// The output has the same length as the input. Missing values are padded
/// with the last observed value first, so a gap reads as no change. The
/// first element and any change before the first observed value are `NaN`.
pub fn pct_change(values: &[f64]) -> Vec<f64> {
    let padded = forward_fill(values);
    let mut changes = Vec::with_capacity(padded.len());
    if padded.is_empty() {
        return changes;
    }

    changes.push(f64::NAN);
    for window in padded.windows(2) {
        changes.push(window[1] / window[0] - 1.0);
    }

    changes
}

/// Replace each `NaN` with the most recent non-`NaN` value. Leading `NaN`s stay.
pub fn forward_fill(values: &[f64]) -> Vec<f64> {
    let mut last = f64::NAN;
    values
        .iter()
        .map(|&v| {
            if !v.is_nan() {
                last = v;
            }
            last
        })
        .collect()
}

/// Mean of the defined percentage changes of `values`.
///
/// Changes are taken over the padded series; the undefined ones (the first,
/// and those before any observation) are dropped before averaging. With
/// fewer than two usable points the result is `NaN`.
pub fn mean_pct_change(values: &[f64]) -> f64 {
    let changes: Vec<f64> = pct_change(values)
        .into_iter()
        .filter(|c| !c.is_nan())
        .collect();

    nan_mean(&changes)
}
