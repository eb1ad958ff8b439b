//! Numeric helpers shared by the score normalizations.

/// Denominators at or below this value are treated as zero.
pub(crate) const DEGENERATE_EPS: f64 = 1e-8;

/// Divides `num` by `sqrt(denom_sq)`, or returns `None` when the denominator
/// is degenerate.
pub(crate) fn normalized_ratio(num: f64, denom_sq: f64) -> Option<f64> {
    if !(denom_sq > DEGENERATE_EPS) {
        return None;
    }
    let ratio = num / denom_sq.sqrt();
    ratio.is_finite().then_some(ratio)
}

/// Sum of squared deviations from the mean, given raw sums over `n` samples.
///
/// Clamped at zero to absorb cancellation error.
pub(crate) fn centered_sum_sq(sum: f64, sum_sq: f64, n: f64) -> f64 {
    (sum_sq - sum * sum / n).max(0.0)
}
