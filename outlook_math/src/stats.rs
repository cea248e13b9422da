//! Summary statistics that skip missing values

/// Arithmetic mean of the non-NaN values.
///
/// Returns `NaN` when the slice holds no usable value, so callers can tell an
/// undefined mean apart from a mean of zero.
pub fn nan_mean(values: &[f64]) -> f64 {
    let (sum, count) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// The last `n` elements of a slice, or the whole slice when it is shorter.
pub fn tail<T>(values: &[T], n: usize) -> &[T] {
    &values[values.len().saturating_sub(n)..]
}
