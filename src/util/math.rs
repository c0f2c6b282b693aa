//! Numeric helpers shared by blob and histogram statistics.

/// Standard deviation from running sums, `sqrt(E[x^2] - E[x]^2)`.
///
/// The variance term is clamped at zero so rounding never yields NaN.
pub(crate) fn std_dev_from_sums(sum: f64, sum_sq: f64, count: f64) -> f64 {
    if count <= 0.0 {
        return 0.0;
    }
    let mean = sum / count;
    (sum_sq / count - mean * mean).max(0.0).sqrt()
}

/// Mean from a running sum, zero for an empty population.
pub(crate) fn mean_from_sum(sum: f64, count: f64) -> f64 {
    if count <= 0.0 {
        0.0
    } else {
        sum / count
    }
}

/// Checks that a ratio lies in `[0, 1]` (NaN is rejected).
pub(crate) fn is_unit_ratio(value: f32) -> bool {
    (0.0..=1.0).contains(&value)
}
