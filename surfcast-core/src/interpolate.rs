//! Interpolation of scalar and circular quantities.
//!
//! Both interpolators hold the end values constant outside the sampled range
//! rather than extrapolating.

use num::Float;

/// Piecewise-linear interpolation of `ys` sampled at ascending `xs`.
///
/// Targets before the first sample return the first value and targets after
/// the last sample return the last value. Returns `None` when there are no
/// samples.
///
/// # Panics
/// Panics if `xs` and `ys` differ in length.
pub fn interpolate_linear<T: Float>(xs: &[T], ys: &[T], target: T) -> Option<T> {
    assert_eq!(xs.len(), ys.len(), "xs and ys must have the same length");
    let n = xs.len();
    if n == 0 {
        return None;
    }
    if target <= xs[0] {
        return Some(ys[0]);
    }
    if target >= xs[n - 1] {
        return Some(ys[n - 1]);
    }

    // First index whose abscissa is strictly greater than the target
    let upper = xs.partition_point(|x| *x <= target);
    let lower = upper - 1;
    let span = xs[upper] - xs[lower];
    if span <= T::zero() {
        return Some(ys[lower]);
    }
    let fraction = (target - xs[lower]) / span;
    Some(ys[lower] + fraction * (ys[upper] - ys[lower]))
}

/// Interpolate directions in degrees on the circle.
///
/// Each direction is mapped to a unit vector $(\cos\theta, \sin\theta)$, the
/// components are interpolated linearly and the angle is recovered with
/// `atan2`, so interpolating between 350° and 10° passes through 0° instead
/// of 180°. The result is wrapped onto [0, 360).
///
/// When the interpolated vector vanishes (two exactly opposing samples) the
/// direction degenerates to 0°.
pub fn interpolate_direction<T: Float>(xs: &[T], directions: &[T], target: T) -> Option<T> {
    assert_eq!(
        xs.len(),
        directions.len(),
        "xs and directions must have the same length"
    );
    let cosines: Vec<T> = directions.iter().map(|d| d.to_radians().cos()).collect();
    let sines: Vec<T> = directions.iter().map(|d| d.to_radians().sin()).collect();

    let x = interpolate_linear(xs, &cosines, target)?;
    let y = interpolate_linear(xs, &sines, target)?;

    let full_circle = T::from(360.0)?;
    let degrees = y.atan2(x).to_degrees();
    let wrapped = ((degrees % full_circle) + full_circle) % full_circle;
    if wrapped >= full_circle {
        Some(T::zero())
    } else {
        Some(wrapped)
    }
}
