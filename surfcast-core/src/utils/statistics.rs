//! Descriptive statistics used by calibration and trend analysis.

use ndarray::ArrayView1;

/// Median of a sample.
///
/// Even-length samples return the mean of the two central values.
/// Returns `None` for an empty sample.
///
/// # Example
/// ```
/// use surfcast_core::utils::statistics::median;
///
/// assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
/// assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), Some(2.5));
/// assert_eq!(median(&[]), None);
/// ```
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some(0.5 * (sorted[mid - 1] + sorted[mid]))
    } else {
        Some(sorted[mid])
    }
}

/// Arithmetic mean of a sample, `None` when empty.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Slope of the ordinary least-squares line through `(x, y)`.
///
/// $$b = \frac{\sum (x_i - \bar{x})(y_i - \bar{y})}{\sum (x_i - \bar{x})^2}$$
///
/// Returns 0 when fewer than two points are given or when `x` has no spread.
///
/// # Panics
/// Panics if `x` and `y` differ in length.
pub fn linear_regression_slope(x: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
    assert_eq!(x.len(), y.len(), "x and y must have the same length");
    if x.len() < 2 {
        return 0.0;
    }

    let (x_mean, y_mean) = match (x.mean(), y.mean()) {
        (Some(xm), Some(ym)) => (xm, ym),
        _ => return 0.0,
    };

    let dx = x.mapv(|v| v - x_mean);
    let dy = y.mapv(|v| v - y_mean);
    let sxx = dx.dot(&dx);
    if sxx <= f64::EPSILON {
        return 0.0;
    }
    dx.dot(&dy) / sxx
}
