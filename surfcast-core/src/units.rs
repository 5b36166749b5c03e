//! Unit conversions and angle helpers.
//!
//! Directions follow the meteorological convention: degrees clockwise from true
//! north, describing where waves or wind are coming *from*. Angles used by the
//! wave transformation are measured from the shoreward normal in radians.

use crate::timeseries::FloatValue;

/// Metres to feet.
pub const FEET_PER_METRE: FloatValue = 3.28084;

/// Seconds per hour.
pub const SECONDS_PER_HOUR: FloatValue = 3600.0;

pub fn metres_to_feet(metres: FloatValue) -> FloatValue {
    metres * FEET_PER_METRE
}

pub fn km_to_metres(km: FloatValue) -> FloatValue {
    km * 1000.0
}

/// Normalise an angle in degrees to the interval (-180, 180].
pub fn normalize_angle(degrees: FloatValue) -> FloatValue {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Wrap a direction in degrees onto [0, 360).
pub fn wrap_direction(degrees: FloatValue) -> FloatValue {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Smallest separation between two directions in degrees, in [0, 180].
pub fn angle_between(first: FloatValue, second: FloatValue) -> FloatValue {
    normalize_angle(second - first).abs()
}

/// Propagation angle relative to the shoreward normal.
///
/// `direction_from` is the coming-from direction of the swell and
/// `shore_normal` is the azimuth of the shore normal pointing *offshore*
/// (both in degrees). Waves travel toward `direction_from + 180` and reach
/// the beach head-on when that matches `shore_normal + 180`.
///
/// Returns radians in [-π, π]; zero means straight in.
pub fn angle_to_shore_normal(direction_from: FloatValue, shore_normal: FloatValue) -> FloatValue {
    let going_to = direction_from + 180.0;
    let shoreward = shore_normal + 180.0;
    normalize_angle(going_to - shoreward).to_radians()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_feet_conversion() {
        assert_abs_diff_eq!(metres_to_feet(1.0), 3.28084, epsilon = 1e-12);
        assert_abs_diff_eq!(metres_to_feet(0.0), 0.0);
    }

    #[test]
    fn test_normalize_angle() {
        assert_abs_diff_eq!(normalize_angle(190.0), -170.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_angle(-190.0), 170.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_angle(180.0), 180.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_angle(720.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_wrap_direction() {
        assert_abs_diff_eq!(wrap_direction(-10.0), 350.0, epsilon = 1e-12);
        assert_abs_diff_eq!(wrap_direction(370.0), 10.0, epsilon = 1e-12);
        assert!(wrap_direction(-1e-18) < 360.0);
    }

    #[test]
    fn test_angle_between_is_symmetric_and_short() {
        assert_abs_diff_eq!(angle_between(350.0, 10.0), 20.0, epsilon = 1e-12);
        assert_abs_diff_eq!(angle_between(10.0, 350.0), 20.0, epsilon = 1e-12);
        assert_abs_diff_eq!(angle_between(290.0, 90.0), 160.0, epsilon = 1e-12);
    }

    #[test]
    fn test_head_on_swell_has_zero_angle() {
        // Shore normal points ESE (110), so swell from 110 arrives straight in
        assert_abs_diff_eq!(angle_to_shore_normal(110.0, 110.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_oblique_swell_angle() {
        let theta = angle_to_shore_normal(90.0, 110.0);
        assert_abs_diff_eq!(theta.to_degrees(), -20.0, epsilon = 1e-9);

        let theta = angle_to_shore_normal(130.0, 110.0);
        assert_abs_diff_eq!(theta.to_degrees(), 20.0, epsilon = 1e-9);
    }
}
