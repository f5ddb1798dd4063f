//! NaN-aware reductions.
//!
//! Accuracy diagnostics mark cells where an Euler residual is meaningless
//! (binding borrowing constraint, grid edge) with `NaN`; these helpers skip
//! such cells instead of propagating them.

/// Maximum over the finite-or-infinite, non-NaN entries; `NaN` if there are none.
///
/// # Example
///
/// ```
/// use aiyagari_core::math::stats::nan_max;
///
/// assert_eq!(nan_max(&[1.0, f64::NAN, 3.0]), 3.0);
/// assert!(nan_max(&[f64::NAN]).is_nan());
/// ```
pub fn nan_max(values: &[f64]) -> f64 {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(f64::NAN, f64::max)
}

/// Mean over the non-NaN entries; `NaN` if there are none.
///
/// # Example
///
/// ```
/// use aiyagari_core::math::stats::nan_mean;
///
/// assert_eq!(nan_mean(&[1.0, f64::NAN, 3.0]), 2.0);
/// ```
pub fn nan_mean(values: &[f64]) -> f64 {
    let (sum, count) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Number of non-NaN entries.
pub fn count_valid(values: &[f64]) -> usize {
    values.iter().filter(|v| !v.is_nan()).count()
}

/// Arithmetic mean; `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        f64::NAN
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Largest absolute elementwise difference between two equally sized slices.
pub fn sup_norm_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_max_skips_nan() {
        assert_eq!(nan_max(&[f64::NAN, -2.0, -5.0]), -2.0);
    }

    #[test]
    fn test_nan_max_keeps_infinities() {
        assert_eq!(nan_max(&[f64::NEG_INFINITY, -3.0]), -3.0);
        assert_eq!(nan_max(&[f64::NEG_INFINITY]), f64::NEG_INFINITY);
    }

    #[test]
    fn test_all_nan() {
        assert!(nan_max(&[f64::NAN, f64::NAN]).is_nan());
        assert!(nan_mean(&[f64::NAN]).is_nan());
        assert_eq!(count_valid(&[f64::NAN]), 0);
    }

    #[test]
    fn test_nan_mean() {
        assert_eq!(nan_mean(&[f64::NAN, 2.0, 4.0, f64::NAN]), 3.0);
        assert_eq!(count_valid(&[f64::NAN, 2.0, 4.0, f64::NAN]), 2);
    }

    #[test]
    fn test_mean_and_distance() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
        assert!(mean(&[]).is_nan());
        assert_eq!(sup_norm_distance(&[1.0, 2.0], &[1.5, 0.0]), 2.0);
    }
}
