//! Descriptive statistics over rank values.
//!
//! All functions return `None` for empty input instead of `NaN`.

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median; the mean of the two middle values for even lengths.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Population variance.
pub fn variance(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    Some(values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64)
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    variance(values).map(f64::sqrt)
}

/// Discrete Gini coefficient.
///
/// `G = (2·Σ(i·x_i) − (n+1)·Σx_i) / (n·Σx_i)` over the values sorted
/// ascending, with `i` the 1-based position. `None` for empty input or a
/// zero sum.
///
/// # Examples
///
/// ```
/// use capmatch_eval::metrics::gini;
///
/// assert_eq!(gini(&[2.0, 2.0, 2.0]), Some(0.0));
/// assert!((gini(&[1.0, 1.0, 1.0, 2.0]).unwrap() - 0.15).abs() < 1e-12);
/// assert_eq!(gini(&[]), None);
/// ```
pub fn gini(values: &[f64]) -> Option<f64> {
    let n = values.len();
    let total: f64 = values.iter().sum();
    if n == 0 || total == 0.0 {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let weighted: f64 = sorted
        .iter()
        .enumerate()
        .map(|(i, x)| (i + 1) as f64 * x)
        .sum();
    let n = n as f64;
    Some((2.0 * weighted - (n + 1.0) * total) / (n * total))
}
